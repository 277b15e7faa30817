//! Interchange files: row sources and tabular export/import.
//!
//! Results and history are flattened to fixed column headers and written as
//! delimited text. Files are encoded fully in memory before anything touches
//! the disk, so a failed export never leaves a partial file behind.

pub mod delimited;

pub use delimited::{read_rows, write_rows, DelimitedConfig};

use crate::error::{NumsiftError, NumsiftResult};
use crate::session::{ParsedRecord, ValidationRecord};
use crate::session::record::STATUS_VALID;
use log::{info, warn};
use std::fs;
use std::path::Path;

pub const RESULTS_HEADER: [&str; 6] = [
    "Number",
    "Full name",
    "Email",
    "Operator",
    "Status",
    "Processed at",
];

pub const HISTORY_HEADER: [&str; 6] = [
    "Country code",
    "Number",
    "Full number",
    "Operator",
    "Status",
    "Processed at",
];

/// File name offered for a results export made on `date` (`YYYY-MM-DD`).
pub fn default_export_name(date: &str) -> String {
    format!("parsed_numbers_{}.csv", date)
}

/// Reads and decodes a delimited file into rows of cells.
pub fn read_path(path: &Path, config: &DelimitedConfig) -> NumsiftResult<Vec<Vec<String>>> {
    let bytes = fs::read(path).map_err(|e| NumsiftError::io(path, e))?;
    read_rows(&bytes, &path.display().to_string(), config).map_err(|e| {
        warn!("failed to decode {}: {}", path.display(), e);
        e
    })
}

fn header_row(header: &[&str]) -> Vec<String> {
    header.iter().map(|h| h.to_string()).collect()
}

/// Flattens results to rows, header first.
pub fn results_to_rows(records: &[ParsedRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![header_row(&RESULTS_HEADER)];
    rows.extend(records.iter().map(|r| {
        vec![
            r.display_phone().to_string(),
            r.name_or_sentinel().to_string(),
            r.email_or_sentinel().to_string(),
            r.operator_name().to_string(),
            r.status().to_string(),
            r.processed_at().to_string(),
        ]
    }));
    rows
}

/// Flattens history to rows, header first.
pub fn history_to_rows(records: &[ValidationRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![header_row(&HISTORY_HEADER)];
    rows.extend(records.iter().map(|r| {
        vec![
            r.country_prefix().to_string(),
            r.raw_digits().to_string(),
            r.full_number().to_string(),
            r.operator_name().to_string(),
            r.status().to_string(),
            r.processed_at().to_string(),
        ]
    }));
    rows
}

/// Maps rows with a header back to history records.
///
/// Columns are located by header name; missing columns read as empty
/// strings and blank rows are ignored. No further shape checks are made.
pub fn history_from_rows(rows: &[Vec<String>]) -> Vec<ValidationRecord> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };

    let column = |name: &str| header.iter().position(|h| h.trim() == name);
    let columns: Vec<Option<usize>> = HISTORY_HEADER.iter().map(|h| column(*h)).collect();

    body.iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            let cell = |i: usize| -> String {
                columns[i]
                    .and_then(|c| row.get(c))
                    .cloned()
                    .unwrap_or_default()
            };
            ValidationRecord::new(
                cell(0),
                cell(1),
                cell(2),
                cell(3),
                cell(4) == STATUS_VALID,
                cell(5),
            )
        })
        .collect()
}

fn write_path(rows: &[Vec<String>], path: &Path, config: &DelimitedConfig) -> NumsiftResult<()> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer, config).map_err(|e| NumsiftError::io(path, e))?;
    fs::write(path, buffer).map_err(|e| NumsiftError::io(path, e))
}

/// Exports results; an empty list is refused and no file is created.
pub fn export_results(
    records: &[ParsedRecord],
    path: &Path,
    config: &DelimitedConfig,
) -> NumsiftResult<usize> {
    if records.is_empty() {
        return Err(NumsiftError::EmptyExport {
            collection: "results".to_string(),
        });
    }

    write_path(&results_to_rows(records), path, config)?;
    info!("exported {} result(s) to {}", records.len(), path.display());
    Ok(records.len())
}

/// Exports history; an empty list is refused and no file is created.
pub fn export_history(
    records: &[ValidationRecord],
    path: &Path,
    config: &DelimitedConfig,
) -> NumsiftResult<usize> {
    if records.is_empty() {
        return Err(NumsiftError::EmptyExport {
            collection: "history".to_string(),
        });
    }

    write_path(&history_to_rows(records), path, config)?;
    info!("exported {} history record(s) to {}", records.len(), path.display());
    Ok(records.len())
}

/// Reads history records from a delimited file.
pub fn import_history(path: &Path, config: &DelimitedConfig) -> NumsiftResult<Vec<ValidationRecord>> {
    let rows = read_path(path, config)?;
    let records = history_from_rows(&rows);
    info!("imported {} history record(s) from {}", records.len(), path.display());
    Ok(records)
}
