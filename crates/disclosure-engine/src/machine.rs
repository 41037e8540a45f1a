//! Disclosure State Machine
//!
//! Tracks one `Visibility` per association and drives transitions:
//!
//! - attach: Unset -> Visible | Hidden, by the discovery-phase rule
//! - trigger change: re-evaluate the change-phase rule
//! - sibling change: Hidden, unconditionally
//!
//! Entering Hidden always clears the group. Hiding a group also collapses
//! any association whose trigger sat inside it and is no longer active.

use disclosure_dom::{AriaState, DomResult, DomTree};

use crate::config::Config;
use crate::mode::{is_active, Phase};
use crate::registry::{AssociationId, Registry};
use crate::visibility::{self, Visibility};

/// Per-association visibility state
#[derive(Debug, Clone, Default)]
pub struct DisclosureMachine {
    states: Vec<Visibility>,
}

impl DisclosureMachine {
    /// Wire ARIA and apply initial state, in registration order
    pub fn initialize(tree: &mut DomTree, registry: &Registry, config: &Config) -> DomResult<Self> {
        let mut machine = Self {
            states: vec![Visibility::Hidden; registry.len()],
        };

        for (id, association) in registry.iter() {
            if config.report_aria {
                let controls: Vec<String> = association
                    .targets
                    .iter()
                    .filter_map(|&t| tree.element(t).and_then(|e| e.id.clone()))
                    .filter(|id| !id.is_empty())
                    .collect();
                if !controls.is_empty() {
                    tree.set_aria(association.trigger, AriaState::Controls(controls))?;
                    tree.set_aria(association.trigger, AriaState::Expanded(false))?;
                }
            }

            let active = is_active(tree, association, Phase::Discovery);
            machine.apply(tree, registry, config, id, Visibility::from_active(active))?;
        }

        tracing::debug!(
            visible = machine.states.iter().filter(|s| s.is_visible()).count(),
            total = machine.states.len(),
            "initial disclosure state applied"
        );
        Ok(machine)
    }

    /// Current state of an association
    pub fn state(&self, id: AssociationId) -> Option<Visibility> {
        self.states.get(id.0).copied()
    }

    /// All states, indexed by association
    pub fn states(&self) -> &[Visibility] {
        &self.states
    }

    /// The association's trigger changed
    pub fn on_trigger_change(
        &mut self,
        tree: &mut DomTree,
        registry: &Registry,
        config: &Config,
        id: AssociationId,
    ) -> DomResult<Visibility> {
        let Some(association) = registry.get(id) else {
            return Ok(Visibility::Hidden);
        };
        let next = Visibility::from_active(is_active(tree, association, Phase::Change));
        self.apply(tree, registry, config, id, next)?;
        Ok(next)
    }

    /// A sibling of the association's trigger changed
    pub fn on_sibling_change(
        &mut self,
        tree: &mut DomTree,
        registry: &Registry,
        config: &Config,
        id: AssociationId,
    ) -> DomResult<Visibility> {
        self.apply(tree, registry, config, id, Visibility::Hidden)?;
        Ok(Visibility::Hidden)
    }

    fn apply(
        &mut self,
        tree: &mut DomTree,
        registry: &Registry,
        config: &Config,
        id: AssociationId,
        next: Visibility,
    ) -> DomResult<()> {
        let Some(association) = registry.get(id) else {
            return Ok(());
        };
        tracing::trace!(association = %id, mode = %association.mode, state = %next, "transition");

        match next {
            Visibility::Visible => visibility::show(tree, config, association)?,
            Visibility::Hidden => visibility::hide(tree, config, association)?,
        }
        if let Some(slot) = self.states.get_mut(id.0) {
            *slot = next;
        }

        if next == Visibility::Hidden {
            self.collapse_nested(tree, registry, config, id)?;
        }
        Ok(())
    }

    /// Hide visible associations whose trigger lies inside `outer`'s targets
    /// and was deactivated by clearing them
    fn collapse_nested(
        &mut self,
        tree: &mut DomTree,
        registry: &Registry,
        config: &Config,
        outer: AssociationId,
    ) -> DomResult<()> {
        let Some(outer_assoc) = registry.get(outer) else {
            return Ok(());
        };
        let nested: Vec<AssociationId> = registry
            .iter()
            .filter(|&(id, a)| {
                id != outer
                    && self.state(id) == Some(Visibility::Visible)
                    && outer_assoc.covers(tree, a.trigger)
                    && !outer_assoc.targets.iter().any(|&t| a.covers(tree, t))
            })
            .map(|(id, _)| id)
            .collect();

        for id in nested {
            let still_active = registry
                .get(id)
                .is_some_and(|a| is_active(tree, a, Phase::Change));
            if !still_active && self.state(id) == Some(Visibility::Visible) {
                self.apply(tree, registry, config, id, Visibility::Hidden)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_dom::Document;
    use disclosure_html::parse;

    fn setup(html: &str) -> (Document, Registry, Config, DisclosureMachine) {
        let mut doc = parse(html).unwrap();
        let registry = Registry::discover(&doc);
        let config = Config::default();
        let machine = DisclosureMachine::initialize(doc.tree_mut(), &registry, &config).unwrap();
        (doc, registry, config, machine)
    }

    #[test]
    fn test_initial_states() {
        let (doc, _, _, machine) = setup(
            r##"
            <input type="checkbox" id="a" data-toggle="#x" checked>
            <input type="checkbox" id="b" data-toggle="#y">
            <div id="x"></div><div id="y"></div>
            "##,
        );
        assert_eq!(machine.states(), &[Visibility::Visible, Visibility::Hidden]);

        let a = doc.get_element_by_id("a").unwrap();
        assert_eq!(doc.tree().attr(a, "aria-controls"), Some("x"));
        assert_eq!(doc.tree().aria_expanded(a), Some(true));
    }

    #[test]
    fn test_trigger_and_sibling_transitions() {
        let (mut doc, registry, config, mut machine) = setup(
            r##"
            <input type="radio" name="r" value="1" id="one" data-toggle-01="#x">
            <input type="radio" name="r" value="2" id="two">
            <div id="x"><input type="text" id="t"></div>
            "##,
        );
        let one = doc.get_element_by_id("one").unwrap();
        let t = doc.get_element_by_id("t").unwrap();
        let id = AssociationId(0);

        doc.tree_mut().set_checked(one, true).unwrap();
        let state = machine
            .on_trigger_change(doc.tree_mut(), &registry, &config, id)
            .unwrap();
        assert_eq!(state, Visibility::Visible);

        doc.tree_mut().set_control_value(t, "because").unwrap();
        machine
            .on_sibling_change(doc.tree_mut(), &registry, &config, id)
            .unwrap();
        assert_eq!(machine.state(id), Some(Visibility::Hidden));
        assert_eq!(doc.tree().control_value(t), Some(""));
    }

    #[test]
    fn test_nested_collapse() {
        let (mut doc, registry, config, mut machine) = setup(
            r##"
            <input type="checkbox" id="outer" data-toggle="#o" checked>
            <div id="o">
                <input type="checkbox" id="inner" data-toggle="#i" checked>
                <div id="i"><input type="text" value="x"></div>
            </div>
            "##,
        );
        assert_eq!(machine.states(), &[Visibility::Visible, Visibility::Visible]);

        let outer = doc.get_element_by_id("outer").unwrap();
        let inner_target = doc.get_element_by_id("i").unwrap();
        doc.tree_mut().set_checked(outer, false).unwrap();
        machine
            .on_trigger_change(doc.tree_mut(), &registry, &config, AssociationId(0))
            .unwrap();

        assert_eq!(machine.states(), &[Visibility::Hidden, Visibility::Hidden]);
        assert!(doc.tree().has_class(inner_target, "js-hidden"));
    }
}
