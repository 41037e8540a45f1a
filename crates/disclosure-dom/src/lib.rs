//! fOS Disclosure DOM - Document Object Model
//!
//! Arena-based DOM tree with the pieces form behaviours need: live form
//! control state, class lists, ARIA attributes, a CSS selector subset and
//! change/click events.

mod aria;
mod classlist;
mod document;
mod dom_events;
mod forms;
mod interner;
mod node;
mod selector;
mod tree;

pub use aria::{parse_bool as parse_aria_bool, AriaState};
pub use classlist::DOMTokenList;
pub use document::Document;
pub use dom_events::{DomEvent, DomEventType, EventDispatcher};
pub use forms::{ControlKind, FormState, InputType};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{
    AttrOp, Combinator, ComplexSelector, CompoundSelector, SelectorError, SelectorList,
    SimpleSelector,
};
pub use tree::{Children, DomError, DomResult, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    /// Arena index, if valid
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.is_valid().then_some(self.0 as usize)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
