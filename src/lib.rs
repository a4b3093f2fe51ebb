//! # chatstats
//!
//! A Rust library for turning a Messenger HTML chat export into a clean,
//! ordered stream of message records and the statistics behind a set of chat
//! charts.
//!
//! ## Overview
//!
//! An export is a single HTML page where every message is one block with an
//! author, a body and a localized timestamp (`den 15 februari 2018 kl. 12:40
//! UTC+01`). Bodies carry mis-encoded emoji, ascii emoticons and stray markup;
//! calls show up as blocks with a duration label. chatstats:
//!
//! - locates message blocks and their regions ([`parsing::blocks`])
//! - cleans up bodies ([`parsing::sanitize`])
//! - normalizes timestamps and call durations ([`parsing::timestamp`],
//!   [`parsing::duration`])
//! - assembles a [`RecordStream`] in document order ([`parser`])
//! - aggregates emoji, word and time-bucket statistics ([`core`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<()> {
//!     let parser = MessengerParser::new()?;
//!     let stream = parser.parse("messages.html".as_ref())?;
//!
//!     write_csv(stream.records(), "records.csv")?;
//!
//!     let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//!     let report = Report::build(&stream, &StatsConfig::default(), today);
//!     println!("{} messages over {} days", report.summary.messages, report.summary.days_in_touch);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`MessengerParser`](parser::MessengerParser) and the [`Parser`](parser::Parser) trait
//! - [`parsing`] - Per-block stages (extraction, sanitizing, timestamps, durations)
//! - [`lexicon`] - Fix map, ascii emoji map and month names
//! - [`config`] - [`ExportLayout`](config::ExportLayout), [`ParserConfig`](config::ParserConfig), [`StatsConfig`](config::StatsConfig)
//! - [`message`] - [`MessageRecord`], [`RecordStream`], [`CanonicalTimestamp`]
//! - [`core`] - Aggregators, [`Report`](core::Report) and record writers
//! - [`format`] - Output format dispatch
//! - [`progress`] - Progress reporting
//! - [`error`] - Unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod lexicon;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::{CanonicalTimestamp, MessageRecord, RecordStream};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::message::{CanonicalTimestamp, MessageRecord, RecordStream};

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Parsing
    pub use crate::lexicon::Lexicon;
    pub use crate::parser::{MessengerParser, Parser};

    // Configuration
    pub use crate::config::{ExportLayout, ParserConfig, StatsConfig};

    // Aggregates
    pub use crate::core::{BucketKind, BucketTable, EmojiFrequencyTable, Report, Summary};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, write_to_format};

    // Progress
    pub use crate::progress::{Progress, ProgressCallback};
}
