//! Form Controls
//!
//! Live state of `<input>`, `<textarea>` and `<option>` elements. As in a
//! browser, the live state is seeded from markup (`value`, `checked`,
//! `selected`, textarea text) and afterwards diverges from the attributes.

use crate::{DomError, DomResult, DomTree, NodeId};

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
    Search,
    Date,
    Time,
    DatetimeLocal,
    Month,
    Week,
    Color,
    Range,
    File,
    Hidden,
    Checkbox,
    Radio,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse from the `type` attribute; unknown types fall back to text
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime-local" => Self::DatetimeLocal,
            "month" => Self::Month,
            "week" => Self::Week,
            "color" => Self::Color,
            "range" => Self::Range,
            "file" => Self::File,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Checkbox or radio
    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Check if this is a button type
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Submit | Self::Reset | Self::Button | Self::Image)
    }

    /// Holds a free-form string value
    pub fn is_text_like(&self) -> bool {
        !self.is_checkable() && !self.is_button()
    }
}

/// Live form state attached to an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Input {
        input_type: InputType,
        value: String,
        checked: bool,
    },
    TextArea {
        value: String,
    },
    Option {
        value: String,
        selected: bool,
    },
}

/// Classification of a node as a form control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Checkbox or radio
    Checkable(InputType),
    /// Text-like `<input>`
    TextLike(InputType),
    TextArea,
    Option,
    Select,
    /// Buttons, non-controls and detached/unknown nodes
    Other,
}

impl DomTree {
    /// Seed live form state from markup for every element in the tree
    pub fn init_form_state(&mut self) {
        let elements = self.element_descendants(self.root());
        for id in &elements {
            self.init_control(*id);
        }
        for &id in &elements {
            if self.is_tag(id, "select") {
                self.normalize_select(id);
            }
        }
        // Last checked radio of a group wins
        for &id in elements.iter().rev() {
            if self.control_kind(id) == ControlKind::Checkable(InputType::Radio) && self.is_checked(id) {
                for other in self.radio_group(id) {
                    if other != id {
                        self.write_checked(other, false);
                    }
                }
            }
        }
        let controls = elements.iter().filter(|&&id| self.form_state(id).is_some()).count();
        tracing::trace!(controls, "seeded form state");
    }

    /// Seed live form state for a single element
    pub fn init_control(&mut self, id: NodeId) {
        let state = match self.tag_name(id) {
            Some("input") => {
                let input_type = InputType::parse(self.attr(id, "type").unwrap_or("text"));
                let value = match self.attr(id, "value") {
                    Some(v) => v.to_string(),
                    // Checkables report "on" when no value is given
                    None if input_type.is_checkable() => "on".to_string(),
                    None => String::new(),
                };
                FormState::Input {
                    input_type,
                    value,
                    checked: self.has_attr(id, "checked"),
                }
            }
            Some("textarea") => FormState::TextArea {
                value: self.text_content(id),
            },
            Some("option") => {
                let value = match self.attr(id, "value") {
                    Some(v) => v.to_string(),
                    None => collapse_whitespace(&self.text_content(id)),
                };
                FormState::Option {
                    value,
                    selected: self.has_attr(id, "selected"),
                }
            }
            _ => return,
        };
        if let Some(elem) = self.element_mut(id) {
            elem.form = Some(state);
        }
    }

    /// A single-select keeps only its last pre-selected option, or falls
    /// back to its first option when none is pre-selected
    fn normalize_select(&mut self, select: NodeId) {
        if !self.is_single_select(select) {
            return;
        }
        let selected: Vec<NodeId> = self
            .select_options(select)
            .into_iter()
            .filter(|&o| self.is_selected(o))
            .collect();
        if let Some((_, rest)) = selected.split_last() {
            for &option in rest {
                self.write_selected(option, false);
            }
        }
        self.select_default_option(select);
    }

    /// Whether `select` is a drop-down that always shows one option
    pub fn is_single_select(&self, select: NodeId) -> bool {
        self.is_tag(select, "select")
            && !self.has_attr(select, "multiple")
            && self
                .attr(select, "size")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .is_none_or(|size| size <= 1)
    }

    /// Select the first option of a single-select that has none selected.
    /// Returns true if an option was selected.
    pub fn select_default_option(&mut self, select: NodeId) -> bool {
        if !self.is_single_select(select) {
            return false;
        }
        let options = self.select_options(select);
        if options.iter().any(|&o| self.is_selected(o)) {
            return false;
        }
        match options.first() {
            Some(&first) => self.write_selected(first, true),
            None => false,
        }
    }

    /// Live form state of an element
    pub fn form_state(&self, id: NodeId) -> Option<&FormState> {
        self.element(id)?.form.as_ref()
    }

    /// Classify a node
    pub fn control_kind(&self, id: NodeId) -> ControlKind {
        match self.form_state(id) {
            Some(FormState::Input { input_type, .. }) if input_type.is_checkable() => {
                ControlKind::Checkable(*input_type)
            }
            Some(FormState::Input { input_type, .. }) if input_type.is_text_like() => {
                ControlKind::TextLike(*input_type)
            }
            Some(FormState::Input { .. }) => ControlKind::Other,
            Some(FormState::TextArea { .. }) => ControlKind::TextArea,
            Some(FormState::Option { .. }) => ControlKind::Option,
            None if self.is_tag(id, "select") => ControlKind::Select,
            None => ControlKind::Other,
        }
    }

    /// Checkedness of a checkbox/radio; false for anything else
    pub fn is_checked(&self, id: NodeId) -> bool {
        matches!(self.form_state(id), Some(FormState::Input { checked: true, .. }))
    }

    /// Set checkedness. Checking a radio unchecks the rest of its group.
    /// Returns true if the state changed.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> DomResult<bool> {
        let ControlKind::Checkable(input_type) = self.control_kind(id) else {
            return Err(DomError::NotAFormControl(id, "checkable"));
        };
        if checked && input_type == InputType::Radio {
            for other in self.radio_group(id) {
                if other != id {
                    self.write_checked(other, false);
                }
            }
        }
        Ok(self.write_checked(id, checked))
    }

    fn write_checked(&mut self, id: NodeId, state: bool) -> bool {
        match self.element_mut(id).and_then(|e| e.form.as_mut()) {
            Some(FormState::Input { checked, .. }) if *checked != state => {
                *checked = state;
                true
            }
            _ => false,
        }
    }

    /// Current value of a control.
    ///
    /// Inputs, textareas and options report their own value; a select reports
    /// the value of its selected option.
    pub fn control_value(&self, id: NodeId) -> Option<&str> {
        match self.form_state(id) {
            Some(FormState::Input { value, .. })
            | Some(FormState::TextArea { value })
            | Some(FormState::Option { value, .. }) => Some(value.as_str()),
            None if self.is_tag(id, "select") => self
                .select_options(id)
                .into_iter()
                .find(|&o| self.is_selected(o))
                .and_then(|o| self.control_value(o)),
            None => None,
        }
    }

    /// Set the string value of a text-like input or textarea.
    /// Returns true if the value changed.
    pub fn set_control_value(&mut self, id: NodeId, new_value: &str) -> DomResult<bool> {
        match self.element_mut(id).and_then(|e| e.form.as_mut()) {
            Some(FormState::Input { input_type, value, .. }) if input_type.is_text_like() => {
                Ok(replace_if_changed(value, new_value))
            }
            Some(FormState::TextArea { value }) => Ok(replace_if_changed(value, new_value)),
            _ => Err(DomError::NotAFormControl(id, "text")),
        }
    }

    /// Selectedness of an option
    pub fn is_selected(&self, id: NodeId) -> bool {
        matches!(self.form_state(id), Some(FormState::Option { selected: true, .. }))
    }

    /// Set selectedness of an option. Selecting an option of a single-select
    /// deselects its siblings. Returns true if the state changed.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> DomResult<bool> {
        if self.control_kind(id) != ControlKind::Option {
            return Err(DomError::NotAFormControl(id, "option"));
        }
        if selected {
            if let Some(select) = self.owning_select(id) {
                if self.is_single_select(select) {
                    for other in self.select_options(select) {
                        if other != id {
                            self.write_selected(other, false);
                        }
                    }
                }
            }
        }
        Ok(self.write_selected(id, selected))
    }

    fn write_selected(&mut self, id: NodeId, state: bool) -> bool {
        match self.element_mut(id).and_then(|e| e.form.as_mut()) {
            Some(FormState::Option { selected, .. }) if *selected != state => {
                *selected = state;
                true
            }
            _ => false,
        }
    }

    /// Option elements of a select, in document order
    pub fn select_options(&self, select: NodeId) -> Vec<NodeId> {
        self.element_descendants(select)
            .into_iter()
            .filter(|&d| self.is_tag(d, "option"))
            .collect()
    }

    /// Nearest `<select>` ancestor of an option
    pub fn owning_select(&self, option: NodeId) -> Option<NodeId> {
        self.ancestors(option).find(|&a| self.is_tag(a, "select"))
    }

    /// Nearest `<form>` ancestor of a control
    pub fn form_owner(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.is_tag(a, "form"))
    }

    /// Radios sharing `id`'s name and form owner, including `id`
    pub fn radio_group(&self, id: NodeId) -> Vec<NodeId> {
        let Some(name) = self.attr(id, "name").filter(|n| !n.is_empty()) else {
            return vec![id];
        };
        let owner = self.form_owner(id);
        let scope = owner.unwrap_or(self.root());
        self.element_descendants(scope)
            .into_iter()
            .filter(|&r| {
                self.control_kind(r) == ControlKind::Checkable(InputType::Radio)
                    && self.attr(r, "name") == Some(name)
                    && self.form_owner(r) == owner
            })
            .collect()
    }
}

fn replace_if_changed(slot: &mut String, new_value: &str) -> bool {
    if slot == new_value {
        return false;
    }
    *slot = new_value.to_string();
    true
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
