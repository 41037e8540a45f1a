//! DOMTokenList (classList)
//!
//! Space-separated token list backing an element's `class` attribute.

/// Ordered set of class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Returns true if the list changed.
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns true if the list changed.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        before != self.tokens.len()
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = match force {
            Some(state) => state,
            None => !self.contains(token),
        };
        if present {
            self.add(token);
        } else {
            self.remove(token);
        }
        present
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let list = DOMTokenList::from_string("panel  js-hidden panel");
        assert_eq!(list.length(), 2);
        assert!(list.contains("js-hidden"));
        assert_eq!(list.value(), "panel js-hidden");
    }

    #[test]
    fn test_add_remove_report_change() {
        let mut list = DOMTokenList::new();
        assert!(list.add("js-hidden"));
        assert!(!list.add("js-hidden"));
        assert!(list.remove("js-hidden"));
        assert!(!list.remove("js-hidden"));
    }

    #[test]
    fn test_toggle_force() {
        let mut list = DOMTokenList::new();
        assert!(list.toggle("js-hidden", Some(true)));
        assert!(list.toggle("js-hidden", Some(true)));
        assert_eq!(list.length(), 1);
        assert!(!list.toggle("js-hidden", None));
        assert!(list.iter().next().is_none());
    }
}
