//! In-memory session state and the two entry points.
//!
//! A [`Session`] owns the only mutable state in the crate: the bulk
//! `results` list and the manual-validation `history` list. Both are
//! replaced or cleared wholesale; individual records are never edited.

pub mod extractor;
pub mod filter;
pub mod record;

pub use extractor::Extractor;
pub use filter::ResultFilter;
pub use record::{status_label, ParsedRecord, ValidationRecord};

use crate::clock::Clock;
use crate::domain::{OperatorScope, OperatorTable};
use crate::error::{NumsiftError, NumsiftResult};
use crate::interchange::{self, DelimitedConfig};
use log::info;
use std::path::Path;

/// Results and history for one user session.
pub struct Session<'t> {
    table: &'t OperatorTable,
    results: Vec<ParsedRecord>,
    history: Vec<ValidationRecord>,
}

impl<'t> Session<'t> {
    pub fn new(table: &'t OperatorTable) -> Self {
        Self {
            table,
            results: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Runs the bulk extractor over `rows`, replacing previous results.
    pub fn run_bulk<F>(&mut self, rows: &[Vec<String>], clock: &dyn Clock, progress: F) -> &[ParsedRecord]
    where
        F: FnMut(u8),
    {
        self.results = Extractor::new(self.table).process_rows(rows, clock, progress);
        &self.results
    }

    /// Decodes a delimited file and runs the bulk extractor over it.
    ///
    /// A decode failure leaves the current results untouched.
    pub fn run_bulk_file<F>(
        &mut self,
        path: &Path,
        config: &DelimitedConfig,
        clock: &dyn Clock,
        progress: F,
    ) -> NumsiftResult<&[ParsedRecord]>
    where
        F: FnMut(u8),
    {
        let rows = interchange::read_path(path, config)?;
        Ok(self.run_bulk(&rows, clock, progress))
    }

    /// Checks `digits` against the patterns of one selected operator.
    ///
    /// The digits are tested exactly as entered; no leading country digit
    /// is stripped. On success one record is appended to the history.
    pub fn validate(
        &mut self,
        country_prefix: &str,
        operator_id: &str,
        digits: &str,
        clock: &dyn Clock,
    ) -> NumsiftResult<&ValidationRecord> {
        if digits.trim().is_empty() {
            return Err(NumsiftError::InvalidInput {
                parameter: "digits".to_string(),
                reason: "enter a phone number".to_string(),
            });
        }

        let rule = self
            .table
            .get(operator_id)
            .ok_or_else(|| NumsiftError::UnknownOperator(operator_id.to_string()))?;
        let classification = self.table.classify(digits, OperatorScope::Only(rule));

        let record = ValidationRecord::new(
            country_prefix.to_string(),
            digits.to_string(),
            format!("{}{}", country_prefix, digits),
            classification.operator_name,
            classification.is_valid,
            clock.now(),
        );
        info!(
            "validated {} against {}: {}",
            record.full_number(),
            operator_id,
            record.status()
        );

        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn results(&self) -> &[ParsedRecord] {
        &self.results
    }

    pub fn history(&self) -> &[ValidationRecord] {
        &self.history
    }

    pub fn filtered(&self, filter: &ResultFilter) -> Vec<&ParsedRecord> {
        filter.apply(&self.results)
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Writes all results to `path`; returns the number of records written.
    pub fn export_results(&self, path: &Path, config: &DelimitedConfig) -> NumsiftResult<usize> {
        interchange::export_results(&self.results, path, config)
    }

    /// Writes the history to `path`; returns the number of records written.
    pub fn export_history(&self, path: &Path, config: &DelimitedConfig) -> NumsiftResult<usize> {
        interchange::export_history(&self.history, path, config)
    }

    /// Replaces the history with the records read from `path`.
    ///
    /// A decode failure leaves the current history untouched.
    pub fn import_history(&mut self, path: &Path, config: &DelimitedConfig) -> NumsiftResult<usize> {
        self.history = interchange::import_history(path, config)?;
        Ok(self.history.len())
    }
}
