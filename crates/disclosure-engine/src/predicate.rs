//! Predicate Evaluator
//!
//! Decides whether a form control currently "has a value", and enumerates
//! the controlled fields of a target group.

use disclosure_dom::{ControlKind, DomTree, NodeId};

/// Whether `id` currently holds a value. Unknown kinds never do.
pub fn has_value(tree: &DomTree, id: NodeId) -> bool {
    match tree.control_kind(id) {
        ControlKind::Checkable(_) => tree.is_checked(id),
        ControlKind::TextLike(_) | ControlKind::TextArea => tree
            .control_value(id)
            .is_some_and(|v| !v.trim().is_empty()),
        ControlKind::Option => {
            tree.is_selected(id) && tree.control_value(id).is_some_and(|v| !v.is_empty())
        }
        ControlKind::Select => tree
            .select_options(id)
            .into_iter()
            .any(|o| has_value(tree, o)),
        ControlKind::Other => false,
    }
}

/// Inputs, options and textareas inside (or equal to) any of `roots`,
/// deduplicated, in document order
pub fn controlled_fields(tree: &DomTree, roots: &[NodeId]) -> Vec<NodeId> {
    let mut fields: Vec<NodeId> = roots
        .iter()
        .flat_map(|&root| std::iter::once(root).chain(tree.element_descendants(root)))
        .filter(|&id| {
            matches!(
                tree.control_kind(id),
                ControlKind::Checkable(_)
                    | ControlKind::TextLike(_)
                    | ControlKind::TextArea
                    | ControlKind::Option
            )
        })
        .collect();
    // Arena ids follow parse order, so sorting restores document order
    fields.sort_unstable();
    fields.dedup();
    fields
}

/// Whether any controlled field inside `roots` has a value
pub fn any_has_value(tree: &DomTree, roots: &[NodeId]) -> bool {
    controlled_fields(tree, roots)
        .into_iter()
        .any(|f| has_value(tree, f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_html::parse;

    fn fixture() -> disclosure_dom::Document {
        parse(
            r#"
            <div id="group">
                <input type="checkbox" id="cb">
                <input type="radio" id="rb" checked>
                <input type="text" id="blank" value="   ">
                <input type="text" id="filled" value="x">
                <textarea id="ta"></textarea>
                <select id="sel">
                    <option id="empty" value="" selected>Choose</option>
                    <option id="gb" value="gb">UK</option>
                </select>
                <input type="submit" id="go" value="Continue">
                <div id="plain">text</div>
            </div>
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_predicate_per_kind() {
        let doc = fixture();
        let tree = doc.tree();
        let id = |s: &str| doc.get_element_by_id(s).unwrap();

        assert!(!has_value(tree, id("cb")));
        assert!(has_value(tree, id("rb")));
        assert!(!has_value(tree, id("blank")));
        assert!(has_value(tree, id("filled")));
        assert!(!has_value(tree, id("ta")));
        // selected but empty value
        assert!(!has_value(tree, id("empty")));
        assert!(!has_value(tree, id("gb")));
        assert!(!has_value(tree, id("sel")));
    }

    #[test]
    fn test_unknown_kinds_have_no_value() {
        let doc = fixture();
        let tree = doc.tree();
        assert!(!has_value(tree, doc.get_element_by_id("go").unwrap()));
        assert!(!has_value(tree, doc.get_element_by_id("plain").unwrap()));
        assert!(!has_value(tree, NodeId::NONE));
    }

    #[test]
    fn test_controlled_fields_dedup_and_order() {
        let doc = fixture();
        let tree = doc.tree();
        let group = doc.get_element_by_id("group").unwrap();
        let ta = doc.get_element_by_id("ta").unwrap();

        let fields = controlled_fields(tree, &[ta, group]);
        // cb, rb, blank, filled, ta, 2 options; not the select, button or div
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], doc.get_element_by_id("cb").unwrap());
        assert!(any_has_value(tree, &[group]));
        assert!(!any_has_value(tree, &[ta]));
    }
}
