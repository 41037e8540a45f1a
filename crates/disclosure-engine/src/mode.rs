//! Mode Resolver
//!
//! Maps toggle attributes to activation rules and evaluates them.

use disclosure_dom::{ControlKind, DomTree, NodeId};

use crate::predicate;
use crate::registry::Association;

/// Marker on a target that opts a `data-toggle` association into the
/// pre-population rule
pub const NEW_MARKER: &str = "data-toggle-new";

/// Activation rule of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleMode {
    /// `data-toggle`: active while the trigger is checked
    Generic,
    /// `data-toggle` with a `data-toggle-new` target: also active at
    /// discovery when the target already holds a value
    New,
    /// `data-toggle-true`
    True,
    /// `data-toggle-false`
    False,
    /// `data-toggle-01`
    ZeroOne,
    /// `data-toggle-02`
    ZeroTwo,
    /// `data-toggle-other`
    Other,
}

/// When an activation rule is being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial evaluation while attaching
    Discovery,
    /// Evaluation in response to a change event
    Change,
}

impl ToggleMode {
    /// Recognised toggle attributes, in the order they are registered
    pub const ATTRIBUTES: [(&'static str, ToggleMode); 6] = [
        ("data-toggle", ToggleMode::Generic),
        ("data-toggle-true", ToggleMode::True),
        ("data-toggle-false", ToggleMode::False),
        ("data-toggle-01", ToggleMode::ZeroOne),
        ("data-toggle-02", ToggleMode::ZeroTwo),
        ("data-toggle-other", ToggleMode::Other),
    ];

    /// Mode for an attribute name
    pub fn from_attribute(name: &str) -> Option<Self> {
        Self::ATTRIBUTES
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|&(_, mode)| mode)
    }

    /// Attribute this mode is declared with
    pub fn attribute(&self) -> &'static str {
        match self {
            ToggleMode::Generic | ToggleMode::New => "data-toggle",
            ToggleMode::True => "data-toggle-true",
            ToggleMode::False => "data-toggle-false",
            ToggleMode::ZeroOne => "data-toggle-01",
            ToggleMode::ZeroTwo => "data-toggle-02",
            ToggleMode::Other => "data-toggle-other",
        }
    }

    /// Short name for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            ToggleMode::Generic => "toggle",
            ToggleMode::New => "toggle-new",
            ToggleMode::True => "toggle-true",
            ToggleMode::False => "toggle-false",
            ToggleMode::ZeroOne => "toggle-01",
            ToggleMode::ZeroTwo => "toggle-02",
            ToggleMode::Other => "toggle-other",
        }
    }

    /// Value a select or text trigger must carry for the association to be
    /// active. Checkables in value-based modes only need to be checked.
    pub fn literal(&self) -> Option<&'static str> {
        match self {
            ToggleMode::Generic | ToggleMode::New => None,
            ToggleMode::True => Some("true"),
            ToggleMode::False => Some("false"),
            ToggleMode::ZeroOne => Some("1"),
            ToggleMode::ZeroTwo => Some("2"),
            ToggleMode::Other => Some("other"),
        }
    }

    /// Whether the mode compares values rather than a boolean
    pub fn is_value_based(&self) -> bool {
        matches!(self, ToggleMode::ZeroOne | ToggleMode::ZeroTwo | ToggleMode::Other)
    }
}

impl std::fmt::Display for ToggleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The value a trigger currently contributes.
///
/// Checkables contribute their value only while checked; options only while
/// selected; selects the value of their selected option.
pub fn current_value(tree: &DomTree, trigger: NodeId) -> Option<&str> {
    match tree.control_kind(trigger) {
        ControlKind::Checkable(_) => {
            if tree.is_checked(trigger) {
                tree.control_value(trigger)
            } else {
                None
            }
        }
        ControlKind::Option => {
            if tree.is_selected(trigger) {
                tree.control_value(trigger)
            } else {
                None
            }
        }
        ControlKind::TextLike(_) | ControlKind::TextArea | ControlKind::Select => {
            tree.control_value(trigger)
        }
        ControlKind::Other => None,
    }
}

/// Evaluate an association's activation rule against the live DOM
pub fn is_active(tree: &DomTree, association: &Association, phase: Phase) -> bool {
    let trigger = association.trigger;
    match association.mode {
        ToggleMode::Generic => tree.is_checked(trigger),
        ToggleMode::New => {
            tree.is_checked(trigger)
                || (phase == Phase::Discovery
                    && predicate::any_has_value(tree, &association.targets))
        }
        // A checkable's own value is its comparison value
        mode if mode.is_value_based()
            && matches!(tree.control_kind(trigger), ControlKind::Checkable(_)) =>
        {
            tree.is_checked(trigger)
        }
        mode => match (mode.literal(), current_value(tree, trigger)) {
            (Some(literal), Some(value)) => value.trim().eq_ignore_ascii_case(literal),
            _ => false,
        },
    }
}
