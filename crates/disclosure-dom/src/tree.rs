//! DOM Tree (arena-based allocation)

use crate::{ElementData, InternedString, Node, NodeData, NodeId, StringInterner};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0:?} is not a {1} form control")]
    NotAFormControl(NodeId, &'static str),

    #[error("hierarchy request error: cannot append {child:?} to {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()?)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()?)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access the name interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name.to_string()))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        let attached = self
            .get(child)
            .ok_or(DomError::NotFound(child))?
            .parent
            .is_valid();
        if attached || child == parent || child == NodeId::ROOT {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.link_last_child(parent, child);
        Ok(())
    }

    /// Create an element and append it under `parent`, which must exist
    pub(crate) fn append_new_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.link_last_child(parent, child);
        child
    }

    fn link_last_child(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
        }
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// All descendants of `id` in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let before = stack.len();
            stack.extend(self.children(next).map(|(c, _)| c));
            stack[before..].reverse();
        }
        out
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Ancestors from the parent up to the document node
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Element data of a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data of a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.resolve(e.name))
    }

    /// Check whether an element has the given tag
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Get an attribute by name
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        let key = self.interner.lookup(name)?;
        self.element(id)?.get_attr(key)
    }

    /// Check whether an attribute is present
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        match (self.interner.lookup(name), self.element(id)) {
            (Some(key), Some(elem)) => elem.has_attr(key),
            _ => false,
        }
    }

    /// Set an attribute, creating it if needed
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let key = self.interner.intern(name);
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        elem.set_attr(key, name, value.to_string());
        Ok(())
    }

    /// Remove an attribute. Returns the old value, if any.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let Some(key) = self.interner.lookup(name) else {
            return Ok(None);
        };
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        Ok(elem.remove_attr(key, name))
    }

    /// Check whether an element carries a class
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    /// Add a class, keeping the `class` attribute in sync
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        if elem.classes.add(class) {
            let value = elem.classes.value();
            self.set_attr(id, "class", &value)?;
        }
        Ok(())
    }

    /// Remove a class, keeping the `class` attribute in sync
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        if elem.classes.remove(class) {
            let value = elem.classes.value();
            self.set_attr(id, "class", &value)?;
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Element descendants of `id` in document order
    pub fn element_descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&d| self.get(d).is_some_and(Node::is_element))
            .collect()
    }

    /// Check whether `node` is `ancestor` or lies beneath it
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Comment/doctype payload for serializers
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.get(id).map(|n| &n.data)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("DIV");
        let a = tree.create_element("input");
        let b = tree.create_element("span");
        let c = tree.create_element("textarea");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();
        tree.append_child(b, c).unwrap();
        (tree, div, a, b, c)
    }

    #[test]
    fn test_descendants_document_order() {
        let (tree, div, a, b, c) = sample();
        assert_eq!(tree.descendants(tree.root()), vec![div, a, b, c]);
        assert_eq!(tree.descendants(b), vec![c]);
    }

    #[test]
    fn test_tag_lowercased() {
        let (tree, div, ..) = sample();
        assert_eq!(tree.tag_name(div), Some("div"));
        assert!(tree.is_tag(div, "DIV"));
    }

    #[test]
    fn test_append_rejects_reparenting() {
        let (mut tree, div, a, ..) = sample();
        assert_eq!(
            tree.append_child(div, a),
            Err(DomError::HierarchyRequest { parent: div, child: a })
        );
        assert_eq!(
            tree.append_child(NodeId(99), a),
            Err(DomError::NotFound(NodeId(99)))
        );
    }

    #[test]
    fn test_class_sync() {
        let (mut tree, div, ..) = sample();
        tree.add_class(div, "panel").unwrap();
        tree.add_class(div, "js-hidden").unwrap();
        assert_eq!(tree.attr(div, "class"), Some("panel js-hidden"));

        tree.remove_class(div, "js-hidden").unwrap();
        assert_eq!(tree.attr(div, "class"), Some("panel"));
        assert!(!tree.has_class(div, "js-hidden"));
    }

    #[test]
    fn test_attr_roundtrip() {
        let (mut tree, div, ..) = sample();
        tree.set_attr(div, "aria-hidden", "true").unwrap();
        assert_eq!(tree.attr(div, "aria-hidden"), Some("true"));
        assert_eq!(tree.remove_attr(div, "aria-hidden"), Ok(Some("true".into())));
        assert!(!tree.has_attr(div, "aria-hidden"));
        assert!(tree.set_attr(tree.root(), "x", "y").is_err());
    }

    #[test]
    fn test_inclusive_descendant() {
        let (tree, div, _, b, c) = sample();
        assert!(tree.is_inclusive_descendant(c, div));
        assert!(tree.is_inclusive_descendant(b, b));
        assert!(!tree.is_inclusive_descendant(div, c));
    }
}
