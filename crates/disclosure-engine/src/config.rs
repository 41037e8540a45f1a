//! Engine Configuration

/// How a hidden target is presented in markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiddenPresentation {
    /// Toggle `Config::hidden_class` (the stylesheet hides it)
    #[default]
    Class,
    /// Toggle the boolean `hidden` attribute
    Attribute,
}

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Class applied to hidden targets when presenting by class
    pub hidden_class: String,

    /// Hidden presentation strategy
    pub presentation: HiddenPresentation,

    /// Write `aria-controls`/`aria-expanded` onto triggers at discovery
    pub report_aria: bool,

    /// Enhance `data-add-one` groups
    pub enable_repeaters: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hidden_class: "js-hidden".to_string(),
            presentation: HiddenPresentation::Class,
            report_aria: true,
            enable_repeaters: cfg!(feature = "repeaters"),
        }
    }
}
