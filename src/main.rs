//! Phone extraction CLI application.
//!
//! This binary provides a command-line interface for the numsift library:
//! bulk extraction from a delimited file, single-number validation with a
//! persistent history file, and a listing of the operator rules.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};

use numsift::interchange::default_export_name;
use numsift::{
    Clock, DelimitedConfig, NumsiftError, OperatorTable, ResultFilter, Session, SystemClock,
};

/// Phone number extractor
///
/// Extracts phone numbers, names and emails from spreadsheet cells and
/// classifies each number by mobile operator.
#[derive(Parser)]
#[command(name = "numsift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file with operator rules (defaults to the built-in table)
    #[arg(long, value_name = "FILE", global = true)]
    rules: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and classify phone numbers from the first column of a file
    Extract {
        /// Input file (first row is a header)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Export file (defaults to parsed_numbers_<date>.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only show rows whose number, name or email contain this text
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,

        /// Only show rows classified as this operator id
        #[arg(long, value_name = "ID")]
        operator: Option<String>,

        /// Field delimiter of the input file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },

    /// Check one number against the patterns of a selected operator
    Validate {
        /// Digits to check, as entered
        digits: String,

        /// Operator id to check against
        #[arg(long, value_name = "ID")]
        operator: String,

        /// Country prefix prepended to the full number
        #[arg(long, default_value = "+7")]
        prefix: String,

        /// History file to load before and save after validating
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// List the operator rules in classification order
    Operators,
}

/// Command handler holding the operator table for the run.
struct ExtractionHandler {
    table: OperatorTable,
    clock: SystemClock,
}

impl ExtractionHandler {
    fn new(rules: Option<&Path>) -> Result<Self> {
        let table = match rules {
            Some(path) => OperatorTable::from_path(path)
                .with_context(|| format!("Failed to load operator rules from {}", path.display()))?,
            None => OperatorTable::builtin(),
        };
        Ok(Self {
            table,
            clock: SystemClock,
        })
    }

    /// Runs bulk extraction, prints the filtered table and exports results.
    fn extract(
        &self,
        input: &Path,
        output: Option<&Path>,
        filter: &ResultFilter,
        config: &DelimitedConfig,
    ) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let size = std::fs::metadata(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
            .len();
        info!("File: {} ({})", input.display(), format_file_size(size));

        let mut session = Session::new(&self.table);
        let mut last = None;
        session
            .run_bulk_file(input, config, &self.clock, |percent| {
                if last != Some(percent) {
                    debug!("progress: {}%", percent);
                    last = Some(percent);
                }
            })
            .with_context(|| format!("Error reading file {}", input.display()))?;

        let shown = session.filtered(filter);
        println!(
            "{:<20} {:<30} {:<28} {:<16} {}",
            "Number", "Full name", "Email", "Operator", "Status"
        );
        for record in &shown {
            println!(
                "{:<20} {:<30} {:<28} {:<16} {}",
                record.display_phone(),
                record.name_or_sentinel(),
                record.email_or_sentinel(),
                record.operator_name(),
                record.status()
            );
        }
        println!(
            "Processed: {} record(s), showing {}",
            session.results().len(),
            shown.len()
        );

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(default_export_name(&self.clock.today_iso())),
        };
        match session.export_results(&output, &DelimitedConfig::csv()) {
            Ok(count) => {
                println!("✓ Exported {} record(s) → {}", count, output.display());
                Ok(())
            }
            Err(err @ NumsiftError::EmptyExport { .. }) => {
                Err(anyhow::Error::new(err).context("No data to export"))
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("Failed to export to {}", output.display()))),
        }
    }

    /// Validates one number, updating the history file when given.
    fn validate(
        &self,
        prefix: &str,
        operator: &str,
        digits: &str,
        history: Option<&Path>,
    ) -> Result<()> {
        let mut session = Session::new(&self.table);
        let config = DelimitedConfig::csv();

        if let Some(path) = history.filter(|p| p.exists()) {
            let loaded = session
                .import_history(path, &config)
                .with_context(|| format!("Error reading history {}", path.display()))?;
            debug!("loaded {} history record(s)", loaded);
        }

        let record = session
            .validate(prefix, operator, digits, &self.clock)
            .with_context(|| "Validation failed")?;
        println!(
            "{} {}: {} ({})",
            if record.is_valid() { "✓" } else { "✗" },
            record.full_number(),
            record.status(),
            record.operator_name()
        );

        if let Some(path) = history {
            session
                .export_history(path, &config)
                .with_context(|| format!("Failed to write history {}", path.display()))?;
            println!("History: {} record(s) → {}", session.history().len(), path.display());
        }

        Ok(())
    }

    fn list_operators(&self) {
        for rule in self.table.rules() {
            let patterns: Vec<&str> = rule.patterns().collect();
            println!(
                "{:<10} {:<16} {}{}",
                rule.id(),
                rule.display_name(),
                patterns.join(" "),
                if rule.is_catch_all() { " (fallback)" } else { "" }
            );
        }
    }
}

/// Human-readable file size (`1.5 KB`).
fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let handler = ExtractionHandler::new(cli.rules.as_deref())?;

    match &cli.command {
        Commands::Extract {
            input,
            output,
            search,
            operator,
            delimiter,
        } => {
            let mut filter = ResultFilter::new();
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            if let Some(operator) = operator {
                filter = filter.with_operator(operator);
            }
            let config = DelimitedConfig {
                delimiter: *delimiter,
                ..DelimitedConfig::csv()
            };
            handler.extract(input, output.as_deref(), &filter, &config)?;
        }
        Commands::Validate {
            digits,
            operator,
            prefix,
            history,
        } => {
            handler.validate(prefix, operator, digits, history.as_deref())?;
        }
        Commands::Operators => handler.list_operators(),
    }

    Ok(())
}
