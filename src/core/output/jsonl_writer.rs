//! JSON Lines (JSONL) output writer.
//!
//! One record per line, handy for line-oriented tools and appending several
//! exports into one dataset.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::Result;
use crate::message::MessageRecord;

/// Writes records to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"text":"Hej","author":"Anna","timestamp":"2018-02-15 12:40:00 Thursday","call_duration_minutes":0.0}
/// ```
pub fn write_jsonl(records: &[MessageRecord], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[MessageRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(records: &[MessageRecord], writer: &mut W) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
