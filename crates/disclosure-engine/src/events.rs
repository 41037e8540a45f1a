//! Listener table
//!
//! Maps (node, event type) to the engine reactions bound there. Listeners
//! run in registration order.

use std::collections::HashMap;

use disclosure_dom::{DomEventType, NodeId};

use crate::registry::{AssociationId, Registry};

/// Reaction bound to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Re-evaluate the association's activation rule
    Trigger(AssociationId),
    /// Force the association Hidden
    Sibling(AssociationId),
    /// Reveal the next item of a repeater group
    AddAnother(usize),
}

/// Event listeners keyed by target node and event type
#[derive(Debug, Clone, Default)]
pub struct ListenerTable {
    listeners: HashMap<(NodeId, DomEventType), Vec<Listener>>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind trigger and sibling listeners for every association
    pub fn bind_registry(&mut self, registry: &Registry) {
        for (id, association) in registry.iter() {
            self.add_listener(association.trigger, DomEventType::Change, Listener::Trigger(id));
            for &sibling in &association.siblings {
                self.add_listener(sibling, DomEventType::Change, Listener::Sibling(id));
            }
        }
    }

    /// Add a listener after any already bound to the same node and type
    pub fn add_listener(&mut self, target: NodeId, event_type: DomEventType, listener: Listener) {
        self.listeners
            .entry((target, event_type))
            .or_default()
            .push(listener);
    }

    /// Listeners for a node and event type, in registration order
    pub fn listeners(&self, target: NodeId, event_type: DomEventType) -> &[Listener] {
        self.listeners
            .get(&(target, event_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of bound listeners
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_html::parse;

    #[test]
    fn test_registration_order_across_associations() {
        let doc = parse(
            r##"
            <input type="radio" name="idType" value="passport" id="p" data-toggle="#passportDiv">
            <input type="radio" name="idType" value="drivingLicence" id="d" data-toggle="#licenceDiv">
            <div id="passportDiv"></div><div id="licenceDiv"></div>
            "##,
        )
        .unwrap();
        let registry = Registry::discover(&doc);
        let mut table = ListenerTable::new();
        table.bind_registry(&registry);

        let d = doc.get_element_by_id("d").unwrap();
        assert_eq!(
            table.listeners(d, DomEventType::Change),
            &[Listener::Sibling(AssociationId(0)), Listener::Trigger(AssociationId(1))]
        );
        assert!(table.listeners(d, DomEventType::Click).is_empty());
        assert_eq!(table.len(), 4);
    }
}
