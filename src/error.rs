//! Error types for the extraction library.
//!
//! Every failure here is local and recoverable: the caller reports it and
//! the session keeps whatever state it had before the failed operation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction and validation operations.
pub type NumsiftResult<T> = Result<T, NumsiftError>;

/// Error type for all library operations.
#[derive(Debug, Error)]
pub enum NumsiftError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Interchange or row source could not be decoded
    #[error("Decode error in '{source_name}' at line {line}: {reason}")]
    Decode {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// Operator pattern failed to compile
    #[error("Pattern error for '{pattern}': {reason}")]
    PatternError { pattern: String, reason: String },

    /// Operator table violates its ordering rules
    #[error("Invalid operator table: {0}")]
    InvalidRuleTable(String),

    /// Operator id not present in the table
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    /// Invalid or missing user input
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Export requested on an empty collection
    #[error("Nothing to export: {collection} is empty")]
    EmptyExport { collection: String },

    /// Operator rules file could not be parsed
    #[error("Configuration error in '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl NumsiftError {
    /// Wraps an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<regex::Error> for NumsiftError {
    fn from(err: regex::Error) -> Self {
        Self::PatternError {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NumsiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            path: PathBuf::from("<inline>"),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumsiftError::UnknownOperator("yota".to_string());
        assert_eq!(err.to_string(), "Unknown operator 'yota'");
    }

    #[test]
    fn test_decode_display_mentions_line() {
        let err = NumsiftError::Decode {
            source_name: "rows.csv".to_string(),
            line: 4,
            reason: "unterminated quoted field".to_string(),
        };
        assert!(err.to_string().contains("line 4"));
        assert!(err.to_string().contains("rows.csv"));
    }
}
