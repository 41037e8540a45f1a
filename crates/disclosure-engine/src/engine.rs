//! Engine - Main entry point

use disclosure_dom::{Document, DomError, NodeId, SelectorError};

use crate::{Config, Page};

/// The disclosure engine
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        tracing::info!("fOS Disclosure {} initialized", crate::VERSION);
        Self { config }
    }

    /// Attach to an already parsed document
    pub fn attach(&self, document: Document) -> Result<Page, EngineError> {
        tracing::debug!(url = document.url(), "attaching");
        Page::attach(document, self.config.clone())
    }

    /// Parse HTML and attach to it
    pub fn load_html(&self, html: &str) -> Result<Page, EngineError> {
        let document = disclosure_html::parse(html)?;
        self.attach(document)
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Engine error
///
/// Disclosure itself never fails: broken markup degrades to "nothing is
/// toggled". These report misuse of the page API.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Parse error: {0}")]
    Parse(#[from] disclosure_html::ParseError),

    #[error("Invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("No element matches {0:?}")]
    NoMatch(String),

    #[error("Select {select} has no option with value {value:?}")]
    UnknownOption { select: NodeId, value: String },
}
