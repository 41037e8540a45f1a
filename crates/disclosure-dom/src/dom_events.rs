//! DOM Events
//!
//! The user-interaction events form behaviours react to.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    /// A control's committed value or checkedness changed
    Change,
    /// Activation of an element (mouse or keyboard)
    Click,
}

impl DomEventType {
    /// Event name as used in markup and scripts
    pub fn name(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Click => "click",
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    fn new(event_type: DomEventType, target: NodeId, cancelable: bool) -> Self {
        Self {
            event_type,
            target,
            bubbles: true,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a change event
    pub fn change(target: NodeId) -> Self {
        Self::new(DomEventType::Change, target, false)
    }

    /// Create a click event
    pub fn click(target: NodeId) -> Self {
        Self::new(DomEventType::Click, target, true)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Dispatch an event. Returns false if the default action was prevented.
    fn dispatch_event(&mut self, event: DomEvent) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_not_cancelable() {
        let mut event = DomEvent::change(NodeId(5));
        event.prevent_default();

        assert_eq!(event.event_type, DomEventType::Change);
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn test_click_cancelable() {
        let mut event = DomEvent::click(NodeId(3));
        event.prevent_default();
        event.stop_propagation();

        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
        assert_eq!(event.event_type.name(), "click");
    }
}
