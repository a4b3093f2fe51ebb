//! Tests for output writers (CSV, JSON, JSONL) and format dispatch

use chatstats::core::output::{CSV_HEADER, write_csv, write_json, write_jsonl};
use chatstats::format::{OutputFormat, to_format_string, write_to_format};
use chatstats::{CanonicalTimestamp, MessageRecord};
use std::fs;
use tempfile::tempdir;

fn ts(s: &str) -> CanonicalTimestamp {
    s.parse().unwrap()
}

fn sample_records() -> Vec<MessageRecord> {
    vec![
        MessageRecord::new("Hej Bertil 🙂", "Anna", ts("2018-02-15 12:40:00 Thursday")),
        MessageRecord::new("kolla  😄", "Anna", ts("2018-02-16 09:05:00 Friday"))
            .with_stripped_tags(vec!["img".to_string()]),
        MessageRecord::new("Bertil ringde dig.", "Bertil", ts("2018-02-18 20:15:00 Sunday"))
            .with_call_duration(1.5),
    ]
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_write_csv_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");

        write_csv(&sample_records(), path.to_str().unwrap()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "2018-02-15 12:40:00 Thursday");
        assert_eq!(&rows[0][2], "Hej Bertil 🙂");
        assert_eq!(&rows[1][4], "img");
        assert_eq!(&rows[2][3], "1.5");
    }

    #[test]
    fn test_write_csv_quotes_separators() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let records = vec![MessageRecord::new(
            "semikolon; och \"citat\"\nny rad",
            "Anna",
            ts("2018-02-15 12:40:00 Thursday"),
        )];

        write_csv(&records, path.to_str().unwrap()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[2], "semikolon; och \"citat\"\nny rad");
    }

    #[test]
    fn test_write_csv_empty_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");

        write_csv(&[], path.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}

// ============================================================================
// JSON / JSONL Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let records = sample_records();

        write_json(&records, path.to_str().unwrap()).unwrap();

        let parsed: Vec<MessageRecord> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_json_shape() {
        let json = to_format_string(&sample_records(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["author"], "Anna");
        assert_eq!(value[0]["timestamp"], "2018-02-15 12:40:00 Thursday");
        assert!(value[0].get("stripped_tags").is_none());
        assert_eq!(value[1]["stripped_tags"][0], "img");
        assert_eq!(value[2]["call_duration_minutes"], 1.5);
    }

    #[test]
    fn test_write_jsonl_one_record_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        write_jsonl(&sample_records(), path.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let record: MessageRecord = serde_json::from_str(line).unwrap();
            assert!(!record.author().is_empty());
        }
    }

    #[test]
    fn test_write_jsonl_empty_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        write_jsonl(&[], path.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.trim().is_empty());
    }
}

// ============================================================================
// Format Dispatch Tests
// ============================================================================

mod format_tests {
    use super::*;

    #[test]
    fn test_write_to_format_all_formats() {
        let dir = tempdir().unwrap();
        for format in OutputFormat::all() {
            let path = dir.path().join(format!("records.{}", format.extension()));
            write_to_format(&sample_records(), path.to_str().unwrap(), *format).unwrap();
            assert!(path.exists());
            assert_eq!(OutputFormat::from_path(path.to_str().unwrap()).unwrap(), *format);
        }
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(OutputFormat::from_path("records.txt").is_err());
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("records.csv");
        let err = write_to_format(&sample_records(), path.to_str().unwrap(), OutputFormat::Csv).unwrap_err();
        assert!(err.is_io());
    }
}
