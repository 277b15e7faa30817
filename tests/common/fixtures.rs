//! Test fixtures and input file builders.
//!
//! Provides a builder for delimited input files shaped like a spreadsheet
//! export: a header row followed by one cell of free text per row.

use anyhow::Result;
use numsift::interchange::{write_rows, DelimitedConfig};
use numsift::FixedClock;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp every fixture clock returns.
pub const FIXED_TIMESTAMP: &str = "16.10.2026, 09:30:00";

/// Clock frozen at [`FIXED_TIMESTAMP`].
pub fn fixed_clock() -> FixedClock {
    FixedClock::new(FIXED_TIMESTAMP, "2026-10-16")
}

/// Builder for input files with custom rows.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let path = TestSheetBuilder::new()
///     .with_row("Иванов Иван 8(923)456-78-90 ivan@mail.ru")
///     .with_row_cells(&["no phone", "8 916 123 45 67"])
///     .build(Path::new("/tmp/rows.csv"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestSheetBuilder {
    header: String,
    rows: Vec<Vec<String>>,
    config: DelimitedConfig,
}

impl TestSheetBuilder {
    pub fn new() -> Self {
        Self {
            header: "Contact".to_string(),
            rows: Vec::new(),
            config: DelimitedConfig::csv().with_write_bom(false),
        }
    }

    pub fn with_header(mut self, header: &str) -> Self {
        self.header = header.to_string();
        self
    }

    /// Adds a row with a single cell.
    pub fn with_row(mut self, cell: &str) -> Self {
        self.rows.push(vec![cell.to_string()]);
        self
    }

    /// Adds a row with several cells; only the first is ever read.
    pub fn with_row_cells(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_config(mut self, config: DelimitedConfig) -> Self {
        self.config = config;
        self
    }

    /// All rows, header first.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = vec![vec![self.header.clone()]];
        rows.extend(self.rows.iter().cloned());
        rows
    }

    /// Writes the file and returns its path.
    pub fn build(&self, path: &Path) -> Result<PathBuf> {
        let mut buffer = Vec::new();
        write_rows(&self.rows(), &mut buffer, &self.config)?;
        fs::write(path, buffer)?;
        Ok(path.to_path_buf())
    }
}

impl Default for TestSheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows mixing every operator, a landline, a row without phone and a blank.
pub fn mixed_contacts() -> TestSheetBuilder {
    TestSheetBuilder::new()
        .with_row("Иванов Иван 8(923)456-78-90 ivan@mail.ru")
        .with_row("Петрова Анна Сергеевна\n+7 916 123-45-67")
        .with_row("office: 8 (495) 765-43-21, sales@corp.ru")
        .with_row("Сидоров Олег oleg@yandex.ru")
        .with_row("")
        .with_row("Козлов Пётр 89051234567")
}

/// Writes raw bytes to `name` inside `dir`.
pub fn write_raw(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}
