//! "Add another" groups
//!
//! A container marked `data-add-one="Link text"` shows its first child and
//! any child that already carries data or a validation error. The rest are
//! hidden behind an appended `<a href="#">Link text</a>`; each click reveals
//! the next hidden child, and the link hides once none remain.

use disclosure_dom::{DomResult, DomTree, NodeId};

use crate::config::Config;
use crate::predicate;
use crate::visibility::{is_presented_hidden, set_presented_hidden};

/// Marker attribute; its value is the link text
pub const ADD_ONE_ATTR: &str = "data-add-one";

/// Class that keeps an item visible
pub const ERROR_CLASS: &str = "form-field--error";

/// An enhanced `data-add-one` container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeater {
    pub container: NodeId,
    /// Element children of the container at discovery, in order
    pub items: Vec<NodeId>,
    /// Appended link, if any item started hidden
    pub link: Option<NodeId>,
}

impl Repeater {
    /// Enhance every `data-add-one` container in the tree
    pub fn discover_all(tree: &mut DomTree, config: &Config) -> DomResult<Vec<Repeater>> {
        let containers: Vec<NodeId> = tree
            .element_descendants(tree.root())
            .into_iter()
            .filter(|&id| tree.has_attr(id, ADD_ONE_ATTR))
            .collect();

        let mut repeaters = Vec::with_capacity(containers.len());
        for container in containers {
            repeaters.push(Self::enhance(tree, config, container)?);
        }
        tracing::debug!(repeaters = repeaters.len(), "enhanced add-another groups");
        Ok(repeaters)
    }

    fn enhance(tree: &mut DomTree, config: &Config, container: NodeId) -> DomResult<Repeater> {
        let items: Vec<NodeId> = tree
            .children(container)
            .filter(|(_, node)| node.is_element())
            .map(|(id, _)| id)
            .collect();

        let mut hidden = 0;
        for &item in items.iter().skip(1) {
            if !Self::keeps_visible(tree, item) {
                set_presented_hidden(tree, config, item, true)?;
                hidden += 1;
            }
        }

        let link = if hidden > 0 {
            let text = tree.attr(container, ADD_ONE_ATTR).unwrap_or_default().to_string();
            let link = tree.create_element("a");
            tree.set_attr(link, "href", "#")?;
            let label = tree.create_text(&text);
            tree.append_child(link, label)?;
            tree.append_child(container, link)?;
            Some(link)
        } else {
            None
        };

        Ok(Repeater { container, items, link })
    }

    fn keeps_visible(tree: &DomTree, item: NodeId) -> bool {
        tree.has_class(item, ERROR_CLASS)
            || predicate::any_has_value(tree, &[item])
            || tree
                .element_descendants(item)
                .into_iter()
                .any(|d| tree.is_tag(d, "option") && tree.has_attr(d, "selected"))
    }

    /// Items still hidden, in order
    pub fn hidden_items(&self, tree: &DomTree, config: &Config) -> Vec<NodeId> {
        self.items
            .iter()
            .copied()
            .filter(|&i| is_presented_hidden(tree, config, i))
            .collect()
    }

    /// Reveal the next hidden item. Returns true if one was revealed.
    pub fn reveal_next(&self, tree: &mut DomTree, config: &Config) -> DomResult<bool> {
        let hidden = self.hidden_items(tree, config);
        let Some(&next) = hidden.first() else {
            return Ok(false);
        };
        set_presented_hidden(tree, config, next, false)?;

        if hidden.len() == 1 {
            if let Some(link) = self.link {
                set_presented_hidden(tree, config, link, true)?;
            }
        }
        tracing::trace!(container = %self.container, item = %next, remaining = hidden.len() - 1, "revealed item");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_html::parse;

    const HTML: &str = r#"
        <div id="nat" data-add-one="Add another nationality">
            <div id="n0"><select><option value="">Pick</option><option value="gb">UK</option></select></div>
            <div id="n1"><select><option value="">Pick</option><option value="fr" selected>France</option></select></div>
            <div id="n2"><select><option value="">Pick</option></select></div>
            <div id="n3" class="form-field--error"><select><option value="">Pick</option></select></div>
            <div id="n4"><select><option value="">Pick</option></select></div>
        </div>
    "#;

    #[test]
    fn test_initial_enhancement() {
        let mut doc = parse(HTML).unwrap();
        let config = Config::default();
        let repeaters = Repeater::discover_all(doc.tree_mut(), &config).unwrap();
        assert_eq!(repeaters.len(), 1);

        let tree = doc.tree();
        let id = |s: &str| doc.get_element_by_id(s).unwrap();
        let r = &repeaters[0];
        assert_eq!(r.items.len(), 5);
        assert_eq!(r.hidden_items(tree, &config), vec![id("n2"), id("n4")]);

        let link = r.link.unwrap();
        assert_eq!(tree.attr(link, "href"), Some("#"));
        assert_eq!(tree.text_content(link), "Add another nationality");
        assert_eq!(tree.parent(link), Some(id("nat")));
    }

    #[test]
    fn test_reveal_until_exhausted() {
        let mut doc = parse(HTML).unwrap();
        let config = Config::default();
        let r = Repeater::discover_all(doc.tree_mut(), &config).unwrap().remove(0);
        let link = r.link.unwrap();

        assert!(r.reveal_next(doc.tree_mut(), &config).unwrap());
        assert!(!is_presented_hidden(doc.tree(), &config, link));
        assert!(r.reveal_next(doc.tree_mut(), &config).unwrap());
        assert!(is_presented_hidden(doc.tree(), &config, link));
        assert!(!r.reveal_next(doc.tree_mut(), &config).unwrap());
    }

    #[test]
    fn test_no_link_when_everything_shown() {
        let mut doc = parse(r#"<ul data-add-one="More"><li>only</li></ul>"#).unwrap();
        let r = Repeater::discover_all(doc.tree_mut(), &Config::default()).unwrap();
        assert_eq!(r[0].link, None);
    }
}
