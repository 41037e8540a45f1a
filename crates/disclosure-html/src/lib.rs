//! fOS Disclosure HTML
//!
//! HTML5 parsing built on html5ever, producing a `disclosure_dom::Document`
//! with live form state seeded from markup, and serialization back to HTML.

mod parser;
mod serializer;

pub use disclosure_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{serialize, serialize_node};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build DOM: {0}")]
    Dom(#[from] disclosure_dom::DomError),
}
