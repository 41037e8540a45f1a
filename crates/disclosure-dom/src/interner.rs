//! String Interner - Deduplicate tag and attribute names
//!
//! Form markup repeats a small vocabulary (`input`, `name`, `value`,
//! `data-toggle`, `aria-hidden`, ...) on every control. Names are stored once
//! and elements hold 4-byte handles.

use std::collections::HashMap;

/// Interned string ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for element and attribute names
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create an interner with the form vocabulary pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };

        interner.intern("");

        const FORM_TAGS: &[&str] = &[
            "html", "head", "body", "div", "span", "p", "a", "label",
            "form", "fieldset", "legend", "input", "button", "select",
            "option", "optgroup", "textarea",
        ];

        const FORM_ATTRS: &[&str] = &[
            "id", "class", "type", "name", "value", "checked", "selected",
            "disabled", "hidden", "href",
            "data-toggle", "data-toggle-new", "data-toggle-true",
            "data-toggle-false", "data-toggle-01", "data-toggle-02",
            "data-toggle-other", "data-add-one",
            "aria-hidden", "aria-expanded", "aria-controls",
        ];

        for name in FORM_TAGS.iter().chain(FORM_ATTRS) {
            interner.intern(name);
        }

        interner
    }

    /// Intern a string, returning the existing handle if already present
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Resolve a handle back to its string
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let id1 = interner.intern("data-foo");
        let id2 = interner.intern("data-foo");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_toggle_vocabulary_preinterned() {
        let interner = StringInterner::new();
        assert!(interner.lookup("data-toggle-other").is_some());
        assert!(interner.lookup("aria-controls").is_some());
        assert!(interner.lookup("data-unknown").is_none());
    }

    #[test]
    fn test_empty_is_zero() {
        let interner = StringInterner::new();
        assert_eq!(interner.get(InternedString::EMPTY), "");
        assert_eq!(interner.lookup(""), Some(InternedString::EMPTY));
    }
}
