//! fOS Disclosure CLI
//!
//! Scripted interaction steps and the association report used by the
//! `disclose` binary.

mod report;
mod step;

pub use report::{describe_node, report};
pub use step::Step;
