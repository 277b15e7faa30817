//! Domain models and business logic for cell content.
//!
//! This module contains the matchers that pull phone numbers, names and
//! emails out of free text, plus the operator rule table that classifies
//! the phone numbers they find.

pub mod contact;
pub mod operator;
pub mod phone;

pub use contact::{EmailMatcher, NameMatcher};
pub use operator::{Classification, OperatorRule, OperatorScope, OperatorTable};
pub use phone::PhoneNumberMatcher;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trait for single-field extraction strategies.
pub trait FieldMatcher: Send + Sync {
    fn pattern(&self) -> &Regex;

    /// Returns the first match in `text`, if any.
    fn find_first<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern().find(text).map(|m| m.as_str())
    }

    fn extract_all<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.pattern().find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Whitespace cleanup applied to cell text before any matching.
pub struct TextCleaner;

impl TextCleaner {
    /// Collapses every whitespace run to a single space and trims the ends.
    pub fn collapse_whitespace(text: &str) -> String {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\s+").expect("Valid regex pattern"));
        PATTERN.replace_all(text, " ").trim().to_string()
    }
}
