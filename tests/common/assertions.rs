//! Custom assertions for extraction testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use numsift::ParsedRecord;
use std::path::Path;

/// Asserts the phone, operator and validity of a record.
///
/// # Panics
/// Panics with the full record when any field differs.
pub fn assert_classified(record: &ParsedRecord, normalized: &str, operator: &str, valid: bool) {
    assert_eq!(
        record.normalized_phone(),
        normalized,
        "Unexpected phone in {:?}",
        record
    );
    assert_eq!(
        record.operator_id(),
        operator,
        "Unexpected operator in {:?}",
        record
    );
    assert_eq!(
        record.is_valid(),
        valid,
        "Unexpected validity in {:?}",
        record
    );
}

/// Asserts that a normalized number is `7` followed by exactly ten digits.
pub fn assert_normalized_shape(normalized: &str) {
    assert_eq!(normalized.len(), 11, "'{}' should have 11 digits", normalized);
    assert!(
        normalized.starts_with('7'),
        "'{}' should start with 7",
        normalized
    );
    assert!(
        normalized.bytes().all(|b| b.is_ascii_digit()),
        "'{}' should contain digits only",
        normalized
    );
}

/// Reads an exported file, dropping a leading BOM.
///
/// # Panics
/// Panics if the file is missing or not UTF-8.
pub fn read_export(path: &Path) -> String {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Export should exist at '{}': {}", path.display(), e));
    text.trim_start_matches('\u{feff}').to_string()
}
