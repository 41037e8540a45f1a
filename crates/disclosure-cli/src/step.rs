//! Scripted interaction steps

use std::str::FromStr;

use disclosure_engine::{EngineError, Page};

/// One user interaction, written `action:SELECTOR[=VALUE]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Check(String),
    Uncheck(String),
    Fill { selector: String, value: String },
    Select { selector: String, value: String },
    Click(String),
}

impl Step {
    /// Perform the step on a page
    pub fn apply(&self, page: &mut Page) -> Result<(), EngineError> {
        tracing::debug!(step = %self, "applying step");
        match self {
            Step::Check(selector) => {
                let id = page.resolve(selector)?;
                page.check(id)
            }
            Step::Uncheck(selector) => {
                let id = page.resolve(selector)?;
                page.uncheck(id)
            }
            Step::Fill { selector, value } => {
                let id = page.resolve(selector)?;
                page.fill(id, value)
            }
            Step::Select { selector, value } => {
                let id = page.resolve(selector)?;
                page.select_option(id, value)
            }
            Step::Click(selector) => {
                let id = page.resolve(selector)?;
                page.click(id).map(|_| ())
            }
        }
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected ACTION:SELECTOR, got {s:?}"))?;
        if rest.trim().is_empty() {
            return Err(format!("missing selector in {s:?}"));
        }

        let with_value = |rest: &str| -> Result<(String, String), String> {
            // Selectors may contain `=` inside brackets; split on the last one
            let (selector, value) = rest
                .rsplit_once('=')
                .filter(|(sel, _)| sel.matches('[').count() == sel.matches(']').count())
                .ok_or_else(|| format!("expected SELECTOR=VALUE, got {rest:?}"))?;
            Ok((selector.to_string(), value.to_string()))
        };

        match action {
            "check" => Ok(Step::Check(rest.to_string())),
            "uncheck" => Ok(Step::Uncheck(rest.to_string())),
            "click" => Ok(Step::Click(rest.to_string())),
            "fill" => with_value(rest).map(|(selector, value)| Step::Fill { selector, value }),
            "select" => with_value(rest).map(|(selector, value)| Step::Select { selector, value }),
            other => Err(format!(
                "unknown action {other:?} (expected check, uncheck, fill, select or click)"
            )),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Check(sel) => write!(f, "check:{sel}"),
            Step::Uncheck(sel) => write!(f, "uncheck:{sel}"),
            Step::Fill { selector, value } => write!(f, "fill:{selector}={value}"),
            Step::Select { selector, value } => write!(f, "select:{selector}={value}"),
            Step::Click(sel) => write!(f, "click:{sel}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!("check:#a".parse(), Ok(Step::Check("#a".into())));
        assert_eq!(
            "fill:#passportNumber=123456".parse(),
            Ok(Step::Fill { selector: "#passportNumber".into(), value: "123456".into() })
        );
        assert_eq!(
            "fill:input[name=x]=".parse(),
            Ok(Step::Fill { selector: "input[name=x]".into(), value: String::new() })
        );
        assert_eq!(
            "select:#country=other".parse(),
            Ok(Step::Select { selector: "#country".into(), value: "other".into() })
        );
    }

    #[test]
    fn test_reject_malformed_steps() {
        assert!("check".parse::<Step>().is_err());
        assert!("check:".parse::<Step>().is_err());
        assert!("hover:#a".parse::<Step>().is_err());
        assert!("fill:input[name=x]".parse::<Step>().is_err());
    }
}
