//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.append_new_element(tree.root(), "html");
        let head = tree.append_new_element(html, "head");
        let body = tree.append_new_element(html, "body");

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body and seed live form state from markup.
    /// Called once the tree is fully built.
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .children(self.tree.root())
            .map(|(id, _)| id)
            .find(|&id| self.tree.is_tag(id, "html"))
            .unwrap_or(NodeId::NONE);

        if self.html_element.is_valid() {
            for (id, _) in self.tree.children(self.html_element) {
                match self.tree.tag_name(id) {
                    Some("head") => self.head_element = id,
                    Some("body") => self.body_element = id,
                    _ => {}
                }
            }
        }

        self.tree.init_form_state();
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .children(self.head_element)
            .find(|&(id, _)| self.tree.is_tag(id, "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (first in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .element_descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id.as_deref()) == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new("about:blank");
        assert!(doc.document_element().is_valid());
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().tag_name(doc.head()), Some("head"));
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        let children: Vec<_> = doc.tree().children(doc.document_element()).map(|(id, _)| id).collect();
        assert_eq!(children, vec![doc.head(), doc.body()]);
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_finalize_and_lookup() {
        let mut doc = Document::new("https://example.test/form");
        let body = doc.body();
        let tree = doc.tree_mut();
        let input = tree.create_element("input");
        tree.set_attr(input, "id", "hasOtherName").unwrap();
        tree.set_attr(input, "type", "checkbox").unwrap();
        tree.set_attr(input, "checked", "").unwrap();
        tree.append_child(body, input).unwrap();
        doc.finalize();

        assert_eq!(doc.get_element_by_id("hasOtherName"), Some(input));
        assert!(doc.tree().is_checked(input));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
