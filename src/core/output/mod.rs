//! Writers for the cleaned record stream.
//!
//! Every writer comes in two shapes: `write_*` streams to a file path and
//! `to_*` renders into a `String`. CSV output sits behind `csv-output`,
//! both JSON shapes behind `json-output`.
//!
//! CSV uses `;` as the delimiter because message text is full of commas.
//! JSON is a single array, handy for chart renderers; JSONL keeps one record
//! per line so several exports can be concatenated.
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::output::write_jsonl;
//! use chatstats::parser::{MessengerParser, Parser};
//!
//! let stream = MessengerParser::new()?.parse_file("messages.html")?;
//! write_jsonl(stream.records(), "records.jsonl")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
