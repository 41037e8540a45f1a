//! HTML serialization
//!
//! Writes the arena DOM back out as HTML. Live form state is reflected into
//! markup (`value`, `checked`, `selected`, textarea text) so the output
//! shows what a user would submit.

use disclosure_dom::{Document, DomTree, FormState, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize a whole document
pub fn serialize(document: &Document) -> String {
    let mut out = String::new();
    serialize_node(document.tree(), document.tree().root(), &mut out);
    out
}

/// Serialize a node and its subtree into `out`
pub fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(data) = tree.data(id) else {
        return;
    };
    match data {
        NodeData::Document => serialize_children(tree, id, out),
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text(text) => {
            let raw = tree
                .parent(id)
                .and_then(|p| tree.tag_name(p))
                .is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
            if raw {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(elem) => {
            let tag = tree.resolve(elem.name);
            out.push('<');
            out.push_str(tag);
            write_attributes(tree, id, out);
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }
            match &elem.form {
                Some(FormState::TextArea { value }) => escape_text(value, out),
                _ => serialize_children(tree, id, out),
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn serialize_children(tree: &DomTree, id: NodeId, out: &mut String) {
    for (child, _) in tree.children(id) {
        serialize_node(tree, child, out);
    }
}

/// Attributes in source order, with live form state substituted for the
/// attributes that seeded it
fn write_attributes(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(elem) = tree.element(id) else {
        return;
    };

    let (live_value, live_flag, flag_name) = match &elem.form {
        Some(FormState::Input { input_type, value, checked }) => {
            let value = (input_type.is_text_like() || tree.has_attr(id, "value"))
                .then_some(value.as_str());
            (value, Some(*checked), "checked")
        }
        Some(FormState::Option { selected, .. }) => (None, Some(*selected), "selected"),
        _ => (None, None, ""),
    };

    let mut wrote_value = false;
    for attr in &elem.attrs {
        let name = tree.resolve(attr.name);
        if live_flag.is_some() && name == flag_name {
            continue;
        }
        if name == "value" {
            if let Some(value) = live_value {
                write_attr(name, value, out);
                wrote_value = true;
                continue;
            }
        }
        write_attr(name, &attr.value, out);
    }

    if let Some(value) = live_value.filter(|v| !wrote_value && !v.is_empty()) {
        write_attr("value", value, out);
    }
    if live_flag == Some(true) {
        out.push(' ');
        out.push_str(flag_name);
    }
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_reflects_live_checkedness() {
        let mut doc = parse(r#"<input type="checkbox" id="cb" checked>"#).unwrap();
        let cb = doc.get_element_by_id("cb").unwrap();
        doc.tree_mut().set_checked(cb, false).unwrap();

        let mut out = String::new();
        serialize_node(doc.tree(), cb, &mut out);
        assert_eq!(out, r#"<input type="checkbox" id="cb">"#);
    }

    #[test]
    fn test_reflects_live_text_value() {
        let mut doc = parse(r#"<input id="t" value="a&quot;b"><textarea id="ta">x</textarea>"#).unwrap();
        let t = doc.get_element_by_id("t").unwrap();
        let ta = doc.get_element_by_id("ta").unwrap();
        doc.tree_mut().set_control_value(ta, "<b>").unwrap();

        let mut out = String::new();
        serialize_node(doc.tree(), t, &mut out);
        assert_eq!(out, r#"<input id="t" value="a&quot;b">"#);

        out.clear();
        serialize_node(doc.tree(), ta, &mut out);
        assert_eq!(out, r#"<textarea id="ta">&lt;b&gt;</textarea>"#);
    }

    #[test]
    fn test_value_appended_when_filled() {
        let mut doc = parse(r#"<input type="text" id="t">"#).unwrap();
        let t = doc.get_element_by_id("t").unwrap();
        doc.tree_mut().set_control_value(t, "123456").unwrap();

        let mut out = String::new();
        serialize_node(doc.tree(), t, &mut out);
        assert_eq!(out, r#"<input type="text" id="t" value="123456">"#);
    }

    #[test]
    fn test_document_roundtrip_shape() {
        let doc = parse("<!DOCTYPE html><p class=\"a\">x &amp; y</p><!--note-->").unwrap();
        let html = serialize(&doc);
        assert!(html.starts_with("<!DOCTYPE html><html><head></head><body>"));
        assert!(html.contains("<p class=\"a\">x &amp; y</p>"));
        assert!(html.contains("<!--note-->"));
    }
}
