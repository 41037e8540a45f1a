//! Reset Policy
//!
//! Clears every controlled field of a group that is being hidden, so that
//! hidden fields never submit stale data.

use disclosure_dom::{ControlKind, DomResult, DomTree, NodeId};

use crate::predicate::controlled_fields;

/// Clear all controlled fields under `roots`.
///
/// Checkables are unchecked, text-likes and textareas emptied, options
/// deselected. A single-select then falls back to its first option, which is
/// not counted. Returns the number of fields that actually changed.
pub fn clear(tree: &mut DomTree, roots: &[NodeId]) -> DomResult<usize> {
    let mut changed: usize = 0;
    let mut selects = Vec::new();
    for field in controlled_fields(tree, roots) {
        let did_change = match tree.control_kind(field) {
            ControlKind::Checkable(_) => tree.set_checked(field, false)?,
            ControlKind::TextLike(_) | ControlKind::TextArea => tree.set_control_value(field, "")?,
            ControlKind::Option => {
                let deselected = tree.set_selected(field, false)?;
                if let Some(select) = tree.owning_select(field) {
                    selects.push((select, deselected.then_some(field)));
                }
                deselected
            }
            ControlKind::Select | ControlKind::Other => false,
        };
        if did_change {
            changed += 1;
        }
    }

    for &(select, _) in &selects {
        if !tree.select_default_option(select) {
            continue;
        }
        // Re-selecting an option that was just deselected is no change
        let restored = tree.select_options(select).first().copied();
        if restored.is_some() && selects.contains(&(select, restored)) {
            changed = changed.saturating_sub(1);
        }
    }
    tracing::trace!(roots = roots.len(), changed, "cleared hidden fields");
    Ok(changed)
}
