//! CSS Selectors
//!
//! Target selectors are parsed by lightningcss and lowered into a small owned
//! form that the arena matches directly: type, universal, `#id`, `.class` and
//! attribute selectors, compound selectors, descendant and child combinators,
//! and comma lists. Anything else parses but is rejected as unsupported.

use lightningcss::rules::CssRule;
use lightningcss::selector::{Component, Selector};
use parcel_selectors::attr::AttrSelectorOperator;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::{DomTree, NodeId};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("invalid selector {selector:?}: {message}")]
    Invalid { selector: String, message: String },

    #[error("unsupported selector {0:?}")]
    Unsupported(String),
}

/// Attribute matching operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[a=v]`
    Equals,
    /// `[a~=v]`
    Includes,
    /// `[a|=v]`
    DashMatch,
    /// `[a^=v]`
    Prefix,
    /// `[a$=v]`
    Suffix,
    /// `[a*=v]`
    Substring,
}

impl AttrOp {
    /// Operator by its lightningcss name
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Equal" => Some(Self::Equals),
            "Includes" => Some(Self::Includes),
            "DashMatch" => Some(Self::DashMatch),
            "Prefix" => Some(Self::Prefix),
            "Suffix" => Some(Self::Suffix),
            "Substring" => Some(Self::Substring),
            _ => None,
        }
    }

    fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::Includes => actual.split_whitespace().any(|t| t == expected),
            Self::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
            Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
            Self::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

/// Simple selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute {
        name: String,
        matcher: Option<(AttrOp, String)>,
    },
}

/// Combinator between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

impl Combinator {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Descendant" => Some(Self::Descendant),
            "Child" => Some(Self::Child),
            _ => None,
        }
    }
}

/// Sequence of simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

/// Compound selectors joined by combinators.
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let invalid = |message: String| SelectorError::Invalid {
            selector: source.to_string(),
            message,
        };
        // The selector is parsed as the prelude of an empty style rule
        if source.contains(['{', '}']) {
            return Err(invalid("unexpected block".to_string()));
        }

        let css = format!("{source} {{}}");
        let sheet = StyleSheet::parse(&css, ParserOptions::default())
            .map_err(|e| invalid(e.to_string()))?;
        let [CssRule::Style(rule)] = sheet.rules.0.as_slice() else {
            return Err(invalid("not a single style rule".to_string()));
        };

        let selectors = rule
            .selectors
            .0
            .iter()
            .map(|sel| lower_selector(sel).ok_or_else(|| SelectorError::Unsupported(source.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }
}

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Lower one parsed selector, or `None` if it uses anything outside the
/// supported subset
fn lower_selector(selector: &Selector<'_>) -> Option<ComplexSelector> {
    let mut compounds = vec![CompoundSelector { parts: Vec::new() }];
    let mut combinators = Vec::new();

    // Match order runs right to left; reversed it is source order
    for component in selector.iter_raw_match_order().rev() {
        if let Component::Combinator(combinator) = component {
            combinators.push(Combinator::from_name(&format!("{combinator:?}"))?);
            compounds.push(CompoundSelector { parts: Vec::new() });
            continue;
        }
        let part = lower_component(component)?;
        compounds.last_mut()?.parts.push(part);
    }

    for compound in &mut compounds {
        if compound.parts.is_empty() {
            compound.parts.push(SimpleSelector::Universal);
        }
    }
    Some(ComplexSelector {
        compounds,
        combinators,
    })
}

/// Variant name of an attribute operator (the upstream type has no `Debug` impl)
fn attr_operator_name(operator: &AttrSelectorOperator) -> &'static str {
    match operator {
        AttrSelectorOperator::Equal => "Equal",
        AttrSelectorOperator::Includes => "Includes",
        AttrSelectorOperator::DashMatch => "DashMatch",
        AttrSelectorOperator::Prefix => "Prefix",
        AttrSelectorOperator::Substring => "Substring",
        AttrSelectorOperator::Suffix => "Suffix",
    }
}

fn lower_component(component: &Component<'_>) -> Option<SimpleSelector> {
    let simple = match component {
        Component::ExplicitUniversalType => SimpleSelector::Universal,
        Component::LocalName(name) => SimpleSelector::Tag(name.lower_name.0.to_string()),
        Component::ID(id) => SimpleSelector::Id(id.0.to_string()),
        Component::Class(class) => SimpleSelector::Class(class.0.to_string()),
        Component::AttributeInNoNamespaceExists {
            local_name_lower, ..
        } => SimpleSelector::Attribute {
            name: local_name_lower.0.to_string(),
            matcher: None,
        },
        Component::AttributeInNoNamespace {
            local_name,
            operator,
            value,
            ..
        } => SimpleSelector::Attribute {
            name: local_name.0.to_ascii_lowercase(),
            matcher: Some((AttrOp::from_name(attr_operator_name(operator))?, value.0.to_string())),
        },
        _ => return None,
    };
    Some(simple)
}

impl DomTree {
    /// Check whether an element matches one simple selector
    fn matches_simple(&self, id: NodeId, simple: &SimpleSelector) -> bool {
        let Some(elem) = self.element(id) else {
            return false;
        };
        match simple {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => self.resolve(elem.name).eq_ignore_ascii_case(tag),
            SimpleSelector::Id(want) => elem.id.as_deref() == Some(want.as_str()),
            SimpleSelector::Class(class) => elem.classes.contains(class),
            SimpleSelector::Attribute { name, matcher } => match (self.attr(id, name), matcher) {
                (Some(_), None) => true,
                (Some(actual), Some((op, expected))) => op.matches(actual, expected),
                (None, _) => false,
            },
        }
    }

    fn matches_compound(&self, id: NodeId, compound: &CompoundSelector) -> bool {
        compound.parts.iter().all(|p| self.matches_simple(id, p))
    }

    /// Match `selector.compounds[..=idx]` with `id` as the subject of `idx`
    fn matches_from(&self, id: NodeId, selector: &ComplexSelector, idx: usize) -> bool {
        if !self.matches_compound(id, &selector.compounds[idx]) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match selector.combinators[idx - 1] {
            Combinator::Child => self
                .parent(id)
                .is_some_and(|p| self.matches_from(p, selector, idx - 1)),
            Combinator::Descendant => self
                .ancestors(id)
                .any(|a| self.matches_from(a, selector, idx - 1)),
        }
    }

    /// Check whether an element matches a selector list
    pub fn matches(&self, id: NodeId, list: &SelectorList) -> bool {
        list.selectors
            .iter()
            .filter(|s| !s.compounds.is_empty())
            .any(|s| self.matches_from(id, s, s.compounds.len() - 1))
    }

    /// All elements beneath `root` matching `list`, in document order
    pub fn query_selector_all(&self, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
        self.element_descendants(root)
            .into_iter()
            .filter(|&id| self.matches(id, list))
            .collect()
    }

    /// First element beneath `root` matching `list`
    pub fn query_selector(&self, root: NodeId, list: &SelectorList) -> Option<NodeId> {
        self.element_descendants(root)
            .into_iter()
            .find(|&id| self.matches(id, list))
    }

    /// Parse `selector` and query the whole document
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.query_selector_all(self.root(), &list))
    }
}
