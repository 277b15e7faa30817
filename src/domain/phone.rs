//! Phone number domain logic.
//!
//! This module encapsulates the rules for finding a Russian mobile number in
//! free text, normalizing it to `7` + ten digits, and formatting it for
//! display.

use super::FieldMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

/// Country digit every normalized number starts with.
pub const COUNTRY_DIGIT: char = '7';

/// Domestic trunk prefix rewritten to [`COUNTRY_DIGIT`].
pub const TRUNK_PREFIX: char = '8';

/// A phone number found in text, before and after trunk normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCandidate {
    /// Digits of the matched substring, separators removed
    pub raw_digits: String,
    /// `raw_digits` with a leading `8` replaced by `7`
    pub normalized: String,
}

/// Russian phone number pattern matcher.
///
/// Accepts an optional `+7` or leading `8` followed by a 3-3-2-2 digit
/// grouping, with spaces, parentheses and hyphens allowed between groups:
/// - 8(923)456-78-90
/// - +7 923 456 78 90
/// - 8-923-456-78-90
#[derive(Debug, Clone)]
pub struct PhoneNumberMatcher;

impl PhoneNumberMatcher {
    /// Creates a new phone number matcher.
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(\+7|8)[\s(\-]*([0-9]{3})[\s)\-]*([0-9]{3})[\s\-]*([0-9]{2})[\s\-]*([0-9]{2})",
            )
            .expect("Valid phone number regex")
        });
        &PATTERN
    }

    /// Finds the first phone number in `text` and normalizes it.
    pub fn normalize(&self, text: &str) -> Option<PhoneCandidate> {
        let matched = self.find_first(text)?;
        let raw_digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        let normalized = Self::normalize_digits(&raw_digits);
        Some(PhoneCandidate {
            raw_digits,
            normalized,
        })
    }

    /// Replaces a leading trunk prefix `8` with the country digit `7`.
    pub fn normalize_digits(digits: &str) -> String {
        match digits.strip_prefix(TRUNK_PREFIX) {
            Some(rest) => format!("{}{}", COUNTRY_DIGIT, rest),
            None => digits.to_string(),
        }
    }

    /// Formats a normalized number as `+7 (XXX) XXX-XX-XX`.
    ///
    /// Anything that is not exactly `7` followed by ten ASCII digits is
    /// returned unchanged, which also makes the function idempotent.
    pub fn format_display(normalized: &str) -> String {
        let is_normalized = normalized.len() == 11
            && normalized.starts_with(COUNTRY_DIGIT)
            && normalized.bytes().all(|b| b.is_ascii_digit());
        if !is_normalized {
            return normalized.to_string();
        }

        format!(
            "+7 ({}) {}-{}-{}",
            &normalized[1..4],
            &normalized[4..7],
            &normalized[7..9],
            &normalized[9..11]
        )
    }
}

impl Default for PhoneNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMatcher for PhoneNumberMatcher {
    fn pattern(&self) -> &Regex {
        Self::regex()
    }
}
