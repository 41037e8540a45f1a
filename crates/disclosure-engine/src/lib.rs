//! fOS Disclosure Engine
//!
//! Progressive disclosure for server-rendered forms. Controls declare what
//! they reveal with `data-toggle*` attributes; the engine shows a target
//! group while its trigger is active and hides (and clears) it otherwise.
//!
//! # Attributes
//! - `data-toggle="SEL"`: visible while the trigger is checked
//! - `data-toggle-new` on a target: also visible if it already holds data
//! - `data-toggle-true` / `data-toggle-false`: trigger value is that boolean
//! - `data-toggle-01` / `data-toggle-02` / `data-toggle-other`: a checked
//!   radio or checkbox, or a select/text value of `1` / `2` / `other`
//! - `data-add-one="Text"`: "add another" group
//!
//! # Example
//! ```rust,ignore
//! use disclosure_engine::{Config, Engine};
//!
//! let engine = Engine::new(Config::default());
//! let mut page = engine.load_html(html)?;
//! let trigger = page.resolve("#otherName")?;
//! page.check(trigger)?;
//! ```

mod config;
mod engine;
mod events;
mod machine;
mod page;
pub mod mode;
pub mod predicate;
pub mod registry;
pub mod repeater;
pub mod reset;
pub mod visibility;

pub use config::{Config, HiddenPresentation};
pub use engine::{Engine, EngineError};
pub use events::{Listener, ListenerTable};
pub use machine::DisclosureMachine;
pub use mode::{Phase, ToggleMode};
pub use page::Page;
pub use registry::{Association, AssociationId, Registry};
pub use repeater::Repeater;
pub use visibility::Visibility;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
