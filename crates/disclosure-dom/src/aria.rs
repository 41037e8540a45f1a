//! ARIA Support
//!
//! The ARIA states written by disclosure widgets and their attribute form.

use crate::{DomResult, DomTree, NodeId};

/// ARIA state/property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AriaState {
    /// `aria-hidden`
    Hidden(bool),
    /// `aria-expanded`
    Expanded(bool),
    /// `aria-controls` (space-separated id references)
    Controls(Vec<String>),
}

impl AriaState {
    /// Attribute name
    pub fn attr_name(&self) -> &'static str {
        match self {
            Self::Hidden(_) => "aria-hidden",
            Self::Expanded(_) => "aria-expanded",
            Self::Controls(_) => "aria-controls",
        }
    }

    /// Attribute value
    pub fn attr_value(&self) -> String {
        match self {
            Self::Hidden(b) | Self::Expanded(b) => b.to_string(),
            Self::Controls(ids) => ids.join(" "),
        }
    }
}

/// Parse an ARIA boolean; anything but `true`/`false` is undefined
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl DomTree {
    /// Write an ARIA state onto an element
    pub fn set_aria(&mut self, id: NodeId, state: AriaState) -> DomResult<()> {
        self.set_attr(id, state.attr_name(), &state.attr_value())
    }

    /// Read `aria-hidden`
    pub fn aria_hidden(&self, id: NodeId) -> Option<bool> {
        self.attr(id, "aria-hidden").and_then(parse_bool)
    }

    /// Read `aria-expanded`
    pub fn aria_expanded(&self, id: NodeId) -> Option<bool> {
        self.attr(id, "aria-expanded").and_then(parse_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_form() {
        assert_eq!(AriaState::Hidden(true).attr_value(), "true");
        assert_eq!(AriaState::Expanded(false).attr_name(), "aria-expanded");
        assert_eq!(
            AriaState::Controls(vec!["a".into(), "b".into()]).attr_value(),
            "a b"
        );
    }

    #[test]
    fn test_set_and_read() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div).unwrap();

        assert_eq!(tree.aria_hidden(div), None);
        tree.set_aria(div, AriaState::Hidden(true)).unwrap();
        assert_eq!(tree.aria_hidden(div), Some(true));
        tree.set_attr(div, "aria-expanded", "mixed").unwrap();
        assert_eq!(tree.aria_expanded(div), None);
    }
}
