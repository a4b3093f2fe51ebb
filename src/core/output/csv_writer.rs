//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::error::Result;
use crate::message::MessageRecord;

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 5] = ["Timestamp", "Author", "Text", "CallMinutes", "StrippedTags"];

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Author`, `Text`, `CallMinutes`, `StrippedTags`
/// - `StrippedTags` joins element names with `,`
/// - Encoding: UTF-8
pub fn write_csv(records: &[MessageRecord], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], returned as a String instead of written to
/// a file.
pub fn to_csv(records: &[MessageRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(records: &[MessageRecord], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(build_record(record))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV record for a single message.
fn build_record(record: &MessageRecord) -> [String; 5] {
    [
        record.timestamp().to_string(),
        record.author().to_string(),
        record.text().to_string(),
        record.call_duration_minutes().to_string(),
        record.stripped_tags().join(","),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::CanonicalTimestamp;
    use tempfile::NamedTempFile;

    fn ts() -> CanonicalTimestamp {
        "2018-02-15 12:40:00 Thursday".parse().unwrap()
    }

    #[test]
    fn test_to_csv_basic() {
        let records = vec![
            MessageRecord::new("Hej", "Anna", ts()),
            MessageRecord::new("", "Bertil", ts()).with_call_duration(1.5),
        ];

        let csv = to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Timestamp;Author;Text;CallMinutes;StrippedTags");
        assert_eq!(lines[1], "2018-02-15 12:40:00 Thursday;Anna;Hej;0;");
        assert_eq!(lines[2], "2018-02-15 12:40:00 Thursday;Bertil;;1.5;");
    }

    #[test]
    fn test_stripped_tags_joined() {
        let record = MessageRecord::new("bild", "Anna", ts())
            .with_stripped_tags(vec!["a".to_string(), "img".to_string()]);
        let csv = to_csv(&[record]).unwrap();
        assert!(csv.contains(";bild;0;a,img"));
    }

    #[test]
    fn test_semicolon_in_text_is_quoted() {
        let csv = to_csv(&[MessageRecord::new("a;b", "Anna", ts())]).unwrap();
        assert!(csv.contains("\"a;b\""));
    }

    #[test]
    fn test_write_csv_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&[MessageRecord::new("Hej", "Anna", ts())], path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Timestamp;Author;Text"));
        assert!(content.contains("Anna;Hej"));
    }
}
