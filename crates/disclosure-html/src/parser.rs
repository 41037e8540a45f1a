//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM. Form state is
//! seeded afterwards by `Document::finalize`, once textarea and option text
//! is in place.

use disclosure_dom::{Document, DomResult, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!(url, bytes = html.len(), "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT)?;
        document.finalize();

        tracing::debug!(nodes = document.tree().len(), "parsed HTML document");
        Ok(document)
    }

    /// Convert an RcDom node (and its subtree) into the arena DOM
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> DomResult<()> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                tree.append_child(parent, id)?;
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attr(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Not meaningful in HTML documents
            }
        }
        Ok(())
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
    }

    #[test]
    fn test_parse_fragment_gets_skeleton() {
        let doc = HtmlParser::new().parse("<div id=\"x\"><span>Text</span></div>").unwrap();

        // Even fragments get wrapped in html/head/body by html5ever
        assert!(doc.body().is_valid());
        let div = doc.get_element_by_id("x").unwrap();
        assert_eq!(doc.tree().parent(div), Some(doc.body()));
    }

    #[test]
    fn test_form_state_seeded() {
        let html = r#"
            <input type="checkbox" id="cb" checked>
            <input type="text" id="t" value="freelancer">
            <textarea id="ta">notes</textarea>
            <select id="s"><option value="">Pick</option><option value="gb" selected>UK</option></select>
        "#;
        let doc = HtmlParser::new().parse(html).unwrap();
        let tree = doc.tree();
        let id = |s: &str| doc.get_element_by_id(s).unwrap();

        assert!(tree.is_checked(id("cb")));
        assert_eq!(tree.control_value(id("t")), Some("freelancer"));
        assert_eq!(tree.control_value(id("ta")), Some("notes"));
        assert_eq!(tree.control_value(id("s")), Some("gb"));
    }
}
