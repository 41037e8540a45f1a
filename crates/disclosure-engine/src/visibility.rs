//! Visibility Controller
//!
//! Applies Visible/Hidden to target groups: presentation (class or `hidden`
//! attribute), `aria-hidden` on targets and `aria-expanded` on the trigger.

use disclosure_dom::{AriaState, DomResult, DomTree, NodeId};

use crate::config::{Config, HiddenPresentation};
use crate::registry::Association;
use crate::reset;

/// Visibility of a target group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Visibility for an activation result
    pub fn from_active(active: bool) -> Self {
        if active { Visibility::Visible } else { Visibility::Hidden }
    }

    pub fn is_visible(&self) -> bool {
        *self == Visibility::Visible
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Visible => f.write_str("visible"),
            Visibility::Hidden => f.write_str("hidden"),
        }
    }
}

/// Add or remove the configured hidden presentation on one element
pub fn set_presented_hidden(
    tree: &mut DomTree,
    config: &Config,
    id: NodeId,
    hidden: bool,
) -> DomResult<()> {
    match (config.presentation, hidden) {
        (HiddenPresentation::Class, true) => tree.add_class(id, &config.hidden_class),
        (HiddenPresentation::Class, false) => tree.remove_class(id, &config.hidden_class),
        (HiddenPresentation::Attribute, true) => tree.set_attr(id, "hidden", ""),
        (HiddenPresentation::Attribute, false) => tree.remove_attr(id, "hidden").map(|_| ()),
    }
}

/// Whether an element carries the configured hidden presentation
pub fn is_presented_hidden(tree: &DomTree, config: &Config, id: NodeId) -> bool {
    match config.presentation {
        HiddenPresentation::Class => tree.has_class(id, &config.hidden_class),
        HiddenPresentation::Attribute => tree.has_attr(id, "hidden"),
    }
}

/// Reveal an association's targets
pub fn show(tree: &mut DomTree, config: &Config, association: &Association) -> DomResult<()> {
    for &target in &association.targets {
        set_presented_hidden(tree, config, target, false)?;
        tree.set_aria(target, AriaState::Hidden(false))?;
    }
    if tree.has_attr(association.trigger, "aria-expanded") {
        tree.set_aria(association.trigger, AriaState::Expanded(true))?;
    }
    Ok(())
}

/// Clear and hide an association's targets
pub fn hide(tree: &mut DomTree, config: &Config, association: &Association) -> DomResult<()> {
    reset::clear(tree, &association.targets)?;
    for &target in &association.targets {
        set_presented_hidden(tree, config, target, true)?;
        tree.set_aria(target, AriaState::Hidden(true))?;
    }
    if tree.has_attr(association.trigger, "aria-controls") {
        tree.set_aria(association.trigger, AriaState::Expanded(false))?;
    }
    Ok(())
}

/// Observed visibility of an association's targets
pub fn observe(tree: &DomTree, config: &Config, association: &Association) -> Visibility {
    let hidden = association
        .targets
        .iter()
        .any(|&t| is_presented_hidden(tree, config, t));
    Visibility::from_active(!hidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ToggleMode;
    use disclosure_html::parse;

    fn fixture() -> (disclosure_dom::Document, Association) {
        let doc = parse(
            r#"
            <input type="checkbox" id="t" aria-controls="x" aria-expanded="true">
            <div id="x" class="panel"><input type="text" value="kept?"></div>
            "#,
        )
        .unwrap();
        let association = Association {
            trigger: doc.get_element_by_id("t").unwrap(),
            mode: ToggleMode::Generic,
            target_selector: "#x".to_string(),
            targets: vec![doc.get_element_by_id("x").unwrap()],
            comparison_value: None,
            siblings: Vec::new(),
        };
        (doc, association)
    }

    #[test]
    fn test_hide_then_show_with_class() {
        let (mut doc, assoc) = fixture();
        let config = Config::default();
        let x = assoc.targets[0];

        hide(doc.tree_mut(), &config, &assoc).unwrap();
        let tree = doc.tree();
        assert!(tree.has_class(x, "js-hidden"));
        assert!(tree.has_class(x, "panel"));
        assert_eq!(tree.aria_hidden(x), Some(true));
        assert_eq!(tree.aria_expanded(assoc.trigger), Some(false));
        assert!(!crate::predicate::any_has_value(tree, &assoc.targets));
        assert_eq!(observe(tree, &config, &assoc), Visibility::Hidden);

        show(doc.tree_mut(), &config, &assoc).unwrap();
        let tree = doc.tree();
        assert!(!tree.has_class(x, "js-hidden"));
        assert_eq!(tree.aria_hidden(x), Some(false));
        assert_eq!(tree.aria_expanded(assoc.trigger), Some(true));
        assert_eq!(observe(tree, &config, &assoc), Visibility::Visible);
    }

    #[test]
    fn test_attribute_presentation() {
        let (mut doc, assoc) = fixture();
        let config = Config {
            presentation: HiddenPresentation::Attribute,
            ..Config::default()
        };
        let x = assoc.targets[0];

        hide(doc.tree_mut(), &config, &assoc).unwrap();
        assert!(doc.tree().has_attr(x, "hidden"));
        assert!(!doc.tree().has_class(x, "js-hidden"));

        show(doc.tree_mut(), &config, &assoc).unwrap();
        assert!(!doc.tree().has_attr(x, "hidden"));
    }

    #[test]
    fn test_expanded_left_alone_without_aria_wiring() {
        let mut doc = parse(r#"<input type="checkbox" id="t"><div id="x"></div>"#).unwrap();
        let assoc = Association {
            trigger: doc.get_element_by_id("t").unwrap(),
            mode: ToggleMode::Generic,
            target_selector: "#x".to_string(),
            targets: vec![doc.get_element_by_id("x").unwrap()],
            comparison_value: None,
            siblings: Vec::new(),
        };
        let config = Config::default();

        hide(doc.tree_mut(), &config, &assoc).unwrap();
        show(doc.tree_mut(), &config, &assoc).unwrap();
        assert_eq!(doc.tree().aria_expanded(assoc.trigger), None);
    }
}
