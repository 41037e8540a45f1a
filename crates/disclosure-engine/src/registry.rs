//! Trigger Registry
//!
//! Discovers trigger/target associations from `data-toggle*` markup. The
//! registry is built once per attach and is read-only afterwards.

use disclosure_dom::{ControlKind, Document, DomTree, InputType, NodeId, SelectorList};

use crate::mode::{ToggleMode, NEW_MARKER};

/// Index of an association in its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssociationId(pub usize);

impl std::fmt::Display for AssociationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// A trigger bound to the target group it reveals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Control whose state drives the association
    pub trigger: NodeId,
    /// Activation rule
    pub mode: ToggleMode,
    /// Selector text as written in markup
    pub target_selector: String,
    /// Target roots, resolved once at discovery, in document order
    pub targets: Vec<NodeId>,
    /// Trigger's own value, recorded for value-based modes
    pub comparison_value: Option<String>,
    /// Same-named inputs whose change hides this association
    pub siblings: Vec<NodeId>,
}

impl Association {
    /// Whether `node` lies within any target root
    pub fn covers(&self, tree: &DomTree, node: NodeId) -> bool {
        self.targets
            .iter()
            .any(|&t| tree.is_inclusive_descendant(node, t))
    }

    /// Whether two associations share any part of their target subtrees
    pub fn overlaps(&self, tree: &DomTree, other: &Association) -> bool {
        self.targets.iter().any(|&t| other.covers(tree, t))
            || other.targets.iter().any(|&t| self.covers(tree, t))
    }
}

/// All associations of a document, in registration order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    associations: Vec<Association>,
}

impl Registry {
    /// Scan a document for toggle attributes.
    ///
    /// Triggers are visited in document order and their attributes in
    /// `ToggleMode::ATTRIBUTES` order. Declarations that are not on a form
    /// control, fail to parse, or match nothing are skipped.
    pub fn discover(document: &Document) -> Self {
        let tree = document.tree();
        let mut associations = Vec::new();

        for element in tree.element_descendants(tree.root()) {
            for &(attr, mode) in ToggleMode::ATTRIBUTES.iter() {
                let Some(selector) = tree.attr(element, attr) else {
                    continue;
                };
                if let Some(association) = Self::resolve(tree, element, attr, mode, selector) {
                    associations.push(association);
                }
            }
        }

        let registry = Self { associations };
        registry.report_overlaps(tree);
        tracing::debug!(associations = registry.len(), "discovered toggle associations");
        registry
    }

    fn resolve(
        tree: &DomTree,
        trigger: NodeId,
        attr: &str,
        mode: ToggleMode,
        selector: &str,
    ) -> Option<Association> {
        if !matches!(
            tree.control_kind(trigger),
            ControlKind::Checkable(_) | ControlKind::TextLike(_) | ControlKind::TextArea | ControlKind::Select
        ) {
            tracing::debug!(%trigger, attr, "toggle attribute on a non-control, skipped");
            return None;
        }

        let selector = selector.trim();
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(err) => {
                tracing::debug!(%trigger, attr, selector, %err, "unparseable target selector");
                return None;
            }
        };
        let targets = tree.query_selector_all(tree.root(), &list);
        if targets.is_empty() {
            tracing::debug!(%trigger, attr, selector, "target selector matches nothing");
            return None;
        }

        let mode = if mode == ToggleMode::Generic
            && targets.iter().any(|&t| tree.has_attr(t, NEW_MARKER))
        {
            ToggleMode::New
        } else {
            mode
        };

        let own_value = tree.attr(trigger, "value").unwrap_or_default();
        let comparison_value = mode.is_value_based().then(|| own_value.to_string());
        tracing::debug!(%trigger, %mode, selector, targets = targets.len(), "registered association");

        Some(Association {
            trigger,
            mode,
            target_selector: selector.to_string(),
            targets,
            comparison_value,
            siblings: Self::siblings(tree, trigger, own_value),
        })
    }

    /// Inputs sharing the trigger's name but carrying a different value.
    /// Checkbox triggers have none.
    fn siblings(tree: &DomTree, trigger: NodeId, own_value: &str) -> Vec<NodeId> {
        if tree.control_kind(trigger) == ControlKind::Checkable(InputType::Checkbox) {
            return Vec::new();
        }
        let Some(name) = tree.attr(trigger, "name").filter(|n| !n.is_empty()) else {
            return Vec::new();
        };
        tree.element_descendants(tree.root())
            .into_iter()
            .filter(|&n| {
                n != trigger
                    && tree.is_tag(n, "input")
                    && tree.attr(n, "name") == Some(name)
                    && tree.attr(n, "value").unwrap_or_default() != own_value
            })
            .collect()
    }

    fn report_overlaps(&self, tree: &DomTree) {
        for (i, a) in self.associations.iter().enumerate() {
            for (j, b) in self.associations.iter().enumerate().skip(i + 1) {
                if a.trigger != b.trigger && a.overlaps(tree, b) {
                    tracing::warn!(
                        first = %AssociationId(i),
                        second = %AssociationId(j),
                        selector = %b.target_selector,
                        "overlapping toggle targets; the later association wins"
                    );
                }
            }
        }
    }

    /// Association by id
    pub fn get(&self, id: AssociationId) -> Option<&Association> {
        self.associations.get(id.0)
    }

    /// Associations in registration order
    pub fn iter(&self) -> impl Iterator<Item = (AssociationId, &Association)> {
        self.associations
            .iter()
            .enumerate()
            .map(|(i, a)| (AssociationId(i), a))
    }

    /// Associations triggered by `node`
    pub fn by_trigger(&self, node: NodeId) -> Vec<AssociationId> {
        self.iter()
            .filter(|(_, a)| a.trigger == node)
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of associations
    pub fn len(&self) -> usize {
        self.associations.len()
    }

    /// Check if nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_html::parse;

    #[test]
    fn test_discover_basic() {
        let doc = parse(
            r##"
            <input type="checkbox" id="c" data-toggle="#more">
            <div id="more"><input type="text" name="x"></div>
            "##,
        )
        .unwrap();
        let registry = Registry::discover(&doc);
        assert_eq!(registry.len(), 1);

        let (id, assoc) = registry.iter().next().unwrap();
        assert_eq!(id, AssociationId(0));
        assert_eq!(assoc.mode, ToggleMode::Generic);
        assert_eq!(assoc.target_selector, "#more");
        assert_eq!(assoc.targets, vec![doc.get_element_by_id("more").unwrap()]);
        assert!(assoc.siblings.is_empty());
        assert_eq!(assoc.comparison_value, None);
    }

    #[test]
    fn test_skips_broken_declarations() {
        let doc = parse(
            r##"
            <input type="checkbox" data-toggle="#missing">
            <input type="checkbox" data-toggle="[unterminated">
            <input type="checkbox" data-toggle="">
            <a href="#" data-toggle="#x">not a control</a>
            <div id="x"></div>
            "##,
        )
        .unwrap();
        assert!(Registry::discover(&doc).is_empty());
    }

    #[test]
    fn test_new_marker_and_multi_root_targets() {
        let doc = parse(
            r#"
            <input type="checkbox" id="c" data-toggle=".extra">
            <div class="extra" data-toggle-new></div>
            <div class="extra"></div>
            "#,
        )
        .unwrap();
        let registry = Registry::discover(&doc);
        let assoc = registry.get(AssociationId(0)).unwrap();
        assert_eq!(assoc.mode, ToggleMode::New);
        assert_eq!(assoc.targets.len(), 2);
    }

    #[test]
    fn test_value_mode_siblings() {
        let doc = parse(
            r##"
            <input type="radio" name="q" value="1" id="yes" data-toggle-01="#why">
            <input type="radio" name="q" value="2" id="no">
            <input type="radio" name="q" value="3" id="maybe">
            <input type="radio" name="other" value="2">
            <div id="why"></div>
            "##,
        )
        .unwrap();
        let registry = Registry::discover(&doc);
        let assoc = registry.get(AssociationId(0)).unwrap();
        let id = |s: &str| doc.get_element_by_id(s).unwrap();

        assert_eq!(assoc.mode, ToggleMode::ZeroOne);
        assert_eq!(assoc.comparison_value.as_deref(), Some("1"));
        assert_eq!(assoc.siblings, vec![id("no"), id("maybe")]);
        assert_eq!(registry.by_trigger(id("yes")), vec![AssociationId(0)]);
    }

    #[test]
    fn test_multiple_attributes_on_one_trigger() {
        let doc = parse(
            r##"
            <select id="s" data-toggle-01="#a" data-toggle-other="#b">
                <option value="1">One</option><option value="other">Other</option>
            </select>
            <div id="a"></div><div id="b"></div>
            "##,
        )
        .unwrap();
        let registry = Registry::discover(&doc);
        let modes: Vec<_> = registry.iter().map(|(_, a)| a.mode).collect();
        assert_eq!(modes, vec![ToggleMode::ZeroOne, ToggleMode::Other]);
    }

    #[test]
    fn test_overlap_detection() {
        let doc = parse(
            r##"
            <input type="checkbox" data-toggle="#outer">
            <input type="checkbox" data-toggle="#inner">
            <div id="outer"><div id="inner"></div></div>
            "##,
        )
        .unwrap();
        let registry = Registry::discover(&doc);
        let a = registry.get(AssociationId(0)).unwrap();
        let b = registry.get(AssociationId(1)).unwrap();
        assert!(a.overlaps(doc.tree(), b));
    }
}
