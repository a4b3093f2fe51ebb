//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::error::Result;
use crate::message::MessageRecord;

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"text": "Hej", "author": "Anna", "timestamp": "2018-02-15 12:40:00 Thursday",
///    "call_duration_minutes": 0.0}
/// ]
/// ```
/// `stripped_tags` is present only when markup was removed.
pub fn write_json(records: &[MessageRecord], output_path: &str) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array.
pub fn to_json(records: &[MessageRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
