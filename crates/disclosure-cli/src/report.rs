//! Association report

use disclosure_dom::{DomTree, NodeId};
use disclosure_engine::Page;

/// Short human label for a node: `#id`, `tag[name=..][value=..]` or the arena id
pub fn describe_node(tree: &DomTree, id: NodeId) -> String {
    if let Some(elem_id) = tree.element(id).and_then(|e| e.id.as_deref()) {
        return format!("#{elem_id}");
    }
    let Some(tag) = tree.tag_name(id) else {
        return id.to_string();
    };
    let mut label = tag.to_string();
    for attr in ["name", "value"] {
        if let Some(v) = tree.attr(id, attr) {
            label.push_str(&format!("[{attr}={v:?}]"));
        }
    }
    label
}

/// One line per association: id, mode, trigger, selector and state
pub fn report(page: &Page) -> String {
    let tree = page.tree();
    page.associations()
        .map(|(id, association, state)| {
            format!(
                "{id}\t{mode}\t{trigger}\t{selector}\t{state}\n",
                mode = association.mode,
                trigger = describe_node(tree, association.trigger),
                selector = association.target_selector,
            )
        })
        .collect()
}
