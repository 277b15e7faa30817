//! Name and email matchers.
//!
//! Both fields are optional in a row: their absence is represented by
//! `None` and rendered with [`NOT_PROVIDED`].

use super::FieldMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

/// Rendered value of a name or email that was not found.
pub const NOT_PROVIDED: &str = "Not provided";

/// Matches a Cyrillic full name: two or three capitalized words.
#[derive(Debug, Clone, Default)]
pub struct NameMatcher;

impl NameMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl FieldMatcher for NameMatcher {
    fn pattern(&self) -> &Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"[А-ЯЁ][а-яё]+\s+[А-ЯЁ][а-яё]+(?:\s+[А-ЯЁ][а-яё]+)?")
                .expect("Valid name regex")
        });
        &PATTERN
    }
}

/// Matches a `local@domain.tld` address with a TLD of two or more letters.
#[derive(Debug, Clone, Default)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl FieldMatcher for EmailMatcher {
    fn pattern(&self) -> &Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("Valid email regex")
        });
        &PATTERN
    }
}

/// Renders an optional field, substituting [`NOT_PROVIDED`].
pub fn or_not_provided(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_PROVIDED)
}
