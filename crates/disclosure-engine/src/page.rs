//! Page - A document with disclosure attached
//!
//! Owns the document, the association registry, the state machine and the
//! listener table. User interactions go through `check`/`fill`/... which
//! mutate form state and dispatch the resulting events.

use disclosure_dom::{
    ControlKind, Document, DomEvent, DomEventType, DomTree, EventDispatcher, InputType, NodeId,
};

use crate::events::{Listener, ListenerTable};
use crate::machine::DisclosureMachine;
use crate::registry::{Association, AssociationId, Registry};
use crate::repeater::Repeater;
use crate::visibility::{self, Visibility};
use crate::{Config, EngineError};

/// A document with disclosure behaviour attached
#[derive(Debug)]
pub struct Page {
    document: Document,
    config: Config,
    registry: Registry,
    machine: DisclosureMachine,
    listeners: ListenerTable,
    repeaters: Vec<Repeater>,
    dispatching: bool,
}

impl Page {
    /// Discover associations, apply initial state and bind listeners
    pub fn attach(mut document: Document, config: Config) -> Result<Self, EngineError> {
        let registry = Registry::discover(&document);
        let machine = DisclosureMachine::initialize(document.tree_mut(), &registry, &config)?;

        let mut listeners = ListenerTable::new();
        listeners.bind_registry(&registry);

        let repeaters = if config.enable_repeaters {
            Repeater::discover_all(document.tree_mut(), &config)?
        } else {
            Vec::new()
        };
        for (index, repeater) in repeaters.iter().enumerate() {
            if let Some(link) = repeater.link {
                listeners.add_listener(link, DomEventType::Click, Listener::AddAnother(index));
            }
        }

        tracing::debug!(
            associations = registry.len(),
            listeners = listeners.len(),
            repeaters = repeaters.len(),
            "disclosure attached"
        );

        Ok(Self {
            document,
            config,
            registry,
            machine,
            listeners,
            repeaters,
            dispatching: false,
        })
    }

    /// The document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The DOM tree
    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    /// Give the document back
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn repeaters(&self) -> &[Repeater] {
        &self.repeaters
    }

    /// Current state of an association
    pub fn state(&self, id: AssociationId) -> Option<Visibility> {
        self.machine.state(id)
    }

    /// Associations with their current state, in registration order
    pub fn associations(&self) -> impl Iterator<Item = (AssociationId, &Association, Visibility)> {
        self.registry.iter().map(|(id, a)| {
            let state = self.machine.state(id).unwrap_or(Visibility::Hidden);
            (id, a, state)
        })
    }

    /// Whether an element currently carries the hidden presentation
    pub fn is_hidden(&self, id: NodeId) -> bool {
        visibility::is_presented_hidden(self.document.tree(), &self.config, id)
    }

    /// First element matching a selector
    pub fn resolve(&self, selector: &str) -> Result<NodeId, EngineError> {
        self.document
            .tree()
            .select(selector)?
            .first()
            .copied()
            .ok_or_else(|| EngineError::NoMatch(selector.to_string()))
    }

    /// Check a checkbox or radio as a user would
    pub fn check(&mut self, id: NodeId) -> Result<(), EngineError> {
        if self.document.tree_mut().set_checked(id, true)? {
            self.dispatch_event(DomEvent::change(id));
        }
        Ok(())
    }

    /// Uncheck a checkbox as a user would
    pub fn uncheck(&mut self, id: NodeId) -> Result<(), EngineError> {
        if self.document.tree_mut().set_checked(id, false)? {
            self.dispatch_event(DomEvent::change(id));
        }
        Ok(())
    }

    /// Type into a text-like input or textarea and commit
    pub fn fill(&mut self, id: NodeId, value: &str) -> Result<(), EngineError> {
        if self.document.tree_mut().set_control_value(id, value)? {
            self.dispatch_event(DomEvent::change(id));
        }
        Ok(())
    }

    /// Pick the option of `select` whose value is `value`
    pub fn select_option(&mut self, select: NodeId, value: &str) -> Result<(), EngineError> {
        let tree = self.document.tree();
        let option = tree
            .select_options(select)
            .into_iter()
            .find(|&o| tree.control_value(o) == Some(value))
            .ok_or_else(|| EngineError::UnknownOption {
                select,
                value: value.to_string(),
            })?;

        if self.document.tree_mut().set_selected(option, true)? {
            self.dispatch_event(DomEvent::change(select));
        }
        Ok(())
    }

    /// Click an element. Checkables run their activation behaviour unless a
    /// listener prevented it. Returns false if the default was prevented.
    pub fn click(&mut self, id: NodeId) -> Result<bool, EngineError> {
        if !self.dispatch_event(DomEvent::click(id)) {
            return Ok(false);
        }
        match self.document.tree().control_kind(id) {
            ControlKind::Checkable(InputType::Radio) => self.check(id)?,
            ControlKind::Checkable(_) => {
                if self.document.tree().is_checked(id) {
                    self.uncheck(id)?;
                } else {
                    self.check(id)?;
                }
            }
            _ => {}
        }
        Ok(true)
    }

    fn handle(&mut self, listener: Listener, event: &mut DomEvent) -> Result<(), EngineError> {
        let tree = self.document.tree_mut();
        match listener {
            Listener::Trigger(id) => {
                self.machine
                    .on_trigger_change(tree, &self.registry, &self.config, id)?;
            }
            Listener::Sibling(id) => {
                self.machine
                    .on_sibling_change(tree, &self.registry, &self.config, id)?;
            }
            Listener::AddAnother(index) => {
                event.prevent_default();
                if let Some(repeater) = self.repeaters.get(index) {
                    repeater.reveal_next(tree, &self.config)?;
                }
            }
        }
        Ok(())
    }
}

impl EventDispatcher for Page {
    fn dispatch_event(&mut self, mut event: DomEvent) -> bool {
        if self.dispatching {
            tracing::trace!(
                event = event.event_type.name(),
                target = %event.target,
                "re-entrant dispatch ignored"
            );
            return true;
        }

        let listeners = self
            .listeners
            .listeners(event.target, event.event_type)
            .to_vec();
        if listeners.is_empty() {
            return true;
        }

        self.dispatching = true;
        for listener in listeners {
            if event.is_propagation_stopped() {
                break;
            }
            if let Err(err) = self.handle(listener, &mut event) {
                tracing::warn!(?listener, %err, "listener failed");
            }
        }
        self.dispatching = false;

        !event.is_default_prevented()
    }
}
