//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! ```rust
//! use chatstats::cli::OutputFormat;
//!
//! let format = OutputFormat::Jsonl;
//! assert_eq!(format.extension(), "jsonl");
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Default record output path; the extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "chat_records.csv";

/// Extract messages from a Messenger HTML export and print chat statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats messages.html
    chatstats messages.html -o records.json -f json --report report.json
    chatstats messages.html --lexicon conversion/english --top 10
    chatstats messages.html --scan-corrupted
    chatstats messages.html --fix-listing listing.txt > bad_unicode_fix.json")]
pub struct Args {
    /// Path to the exported HTML file
    pub input: PathBuf,

    /// Path to the record output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Record output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Also write the aggregate report (JSON) to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<String>,

    /// Directory with bad_unicode_fix.json, ascii_to_emoji.json and
    /// month_converter.json (defaults to the built-in Swedish tables)
    #[arg(long, value_name = "DIR")]
    pub lexicon: Option<PathBuf>,

    /// JSON file with the export's CSS selectors
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Number of emoji in the ranking
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top: usize,

    /// Reference date for "days in touch" (YYYY-MM-DD, default: today)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Print per-block progress and ETA to stderr
    #[arg(long)]
    pub progress: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// List characters that look like broken emoji encodings and exit
    #[arg(long)]
    pub scan_corrupted: bool,

    /// Build bad_unicode_fix.json from a "1; <corrupted>" / "2; <fixed>"
    /// listing, print it and exit
    #[arg(long, value_name = "FILE")]
    pub fix_listing: Option<PathBuf>,
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - Semicolon-delimited table
/// - [`Json`](OutputFormat::Json) - Structured array
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

/// Adjusts the output file extension to the format when the default output
/// path is in use.
pub fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != DEFAULT_OUTPUT {
        return output.to_string();
    }
    format!("chat_records.{}", format.extension())
}
