//! Message counts bucketed by time and author.
//!
//! A [`BucketTable`] is the data behind a stacked bar chart: ordered bucket
//! labels on one axis, one series per author on the other.
//!
//! | Kind | Label | Order |
//! |------|-------|-------|
//! | [`BucketKind::Day`] | `YYYY-MM-DD` | first encountered |
//! | [`BucketKind::Weekday`] | `Monday`..`Sunday` | calendar, only weekdays that occur |
//! | [`BucketKind::HalfHour`] | `HH:MM` | first encountered |

use std::collections::HashMap;

use serde::Serialize;

use crate::message::{CanonicalTimestamp, RecordStream, WEEKDAY_NAMES};

/// How a [`BucketTable`] groups timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Calendar date.
    Day,
    /// Day of the week.
    Weekday,
    /// Time of day, rounded to the nearest half hour.
    HalfHour,
}

impl BucketKind {
    /// Returns the bucket label of `timestamp`.
    pub fn label(self, timestamp: &CanonicalTimestamp) -> String {
        match self {
            BucketKind::Day => timestamp.date().format("%Y-%m-%d").to_string(),
            BucketKind::Weekday => timestamp.weekday_name().to_string(),
            BucketKind::HalfHour => half_hour_bucket(timestamp.hour(), timestamp.minute()),
        }
    }
}

/// Rounds a clock time to the nearest half hour.
///
/// Minutes below 15 round down to `:00`, 15 to 44 go to `:30` and 45 or more
/// round up to the next hour, wrapping 23 to 00.
///
/// ```rust
/// use chatstats::core::buckets::half_hour_bucket;
///
/// assert_eq!(half_hour_bucket(9, 14), "09:00");
/// assert_eq!(half_hour_bucket(9, 15), "09:30");
/// assert_eq!(half_hour_bucket(9, 45), "10:00");
/// assert_eq!(half_hour_bucket(23, 50), "00:00");
/// ```
pub fn half_hour_bucket(hour: u32, minute: u32) -> String {
    let (hour, minute) = match minute {
        0..15 => (hour, 0),
        15..45 => (hour, 30),
        _ => ((hour + 1) % 24, 0),
    };
    format!("{hour:02}:{minute:02}")
}

/// Counts per (bucket, author).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketTable {
    kind: BucketKind,
    labels: Vec<String>,
    authors: Vec<String>,
    /// `counts[author][label]`
    counts: Vec<Vec<usize>>,
    #[serde(skip)]
    label_index: HashMap<String, usize>,
    #[serde(skip)]
    author_index: HashMap<String, usize>,
}

impl BucketTable {
    /// Creates an empty table.
    pub fn new(kind: BucketKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            authors: Vec::new(),
            counts: Vec::new(),
            label_index: HashMap::new(),
            author_index: HashMap::new(),
        }
    }

    /// Buckets every record of `stream`.
    pub fn from_stream(kind: BucketKind, stream: &RecordStream) -> Self {
        let mut table = Self::new(kind);

        if kind == BucketKind::Weekday {
            let present: Vec<&str> = stream.iter().map(|r| r.timestamp().weekday_name()).collect();
            for name in WEEKDAY_NAMES {
                if present.contains(&name) {
                    table.label_slot(name);
                }
            }
        }

        for record in stream {
            table.add(record.timestamp(), record.author());
        }
        table
    }

    /// Messages per calendar day.
    pub fn by_day(stream: &RecordStream) -> Self {
        Self::from_stream(BucketKind::Day, stream)
    }

    /// Messages per weekday.
    pub fn by_weekday(stream: &RecordStream) -> Self {
        Self::from_stream(BucketKind::Weekday, stream)
    }

    /// Messages per half hour of the day.
    pub fn by_half_hour(stream: &RecordStream) -> Self {
        Self::from_stream(BucketKind::HalfHour, stream)
    }

    /// Counts one message.
    pub fn add(&mut self, timestamp: &CanonicalTimestamp, author: &str) {
        let label = self.kind.label(timestamp);
        let label = self.label_slot(&label);
        let author = self.author_slot(author);
        self.counts[author][label] += 1;
    }

    fn label_slot(&mut self, label: &str) -> usize {
        if let Some(&i) = self.label_index.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.labels.push(label.to_string());
        self.label_index.insert(label.to_string(), i);
        for row in &mut self.counts {
            row.push(0);
        }
        i
    }

    fn author_slot(&mut self, author: &str) -> usize {
        if let Some(&i) = self.author_index.get(author) {
            return i;
        }
        let i = self.authors.len();
        self.authors.push(author.to_string());
        self.author_index.insert(author.to_string(), i);
        self.counts.push(vec![0; self.labels.len()]);
        i
    }

    /// Returns the grouping of this table.
    pub fn kind(&self) -> BucketKind {
        self.kind
    }

    /// Bucket labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Authors in first-encountered order.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Returns how many messages `author` sent in bucket `label`.
    pub fn count(&self, label: &str, author: &str) -> usize {
        match (self.label_index.get(label), self.author_index.get(author)) {
            (Some(&l), Some(&a)) => self.counts[a][l],
            _ => 0,
        }
    }

    /// Per-label counts of `author`, aligned with [`labels`](Self::labels).
    pub fn series(&self, author: &str) -> Option<&[usize]> {
        self.author_index.get(author).map(|&a| self.counts[a].as_slice())
    }

    /// Messages in bucket `label` across all authors.
    pub fn bucket_total(&self, label: &str) -> usize {
        self.label_index
            .get(label)
            .map_or(0, |&l| self.counts.iter().map(|row| row[l]).sum())
    }

    /// Messages across all buckets.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRecord;
    use chrono::NaiveDate;

    fn record(author: &str, y: i32, m: u32, d: u32, h: u32, min: u32) -> MessageRecord {
        let ts = CanonicalTimestamp::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), h, min).unwrap();
        MessageRecord::new("x", author, ts)
    }

    fn stream() -> RecordStream {
        [
            record("Anna", 2018, 2, 18, 23, 50), // Sunday
            record("Bertil", 2018, 2, 15, 12, 40), // Thursday
            record("Anna", 2018, 2, 15, 12, 10),
            record("Anna", 2018, 2, 12, 8, 15), // Monday
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_half_hour_edges() {
        assert_eq!(half_hour_bucket(0, 0), "00:00");
        assert_eq!(half_hour_bucket(12, 29), "12:30");
        assert_eq!(half_hour_bucket(12, 30), "12:30");
        assert_eq!(half_hour_bucket(12, 44), "12:30");
        assert_eq!(half_hour_bucket(12, 59), "13:00");
        assert_eq!(half_hour_bucket(23, 45), "00:00");
    }

    #[test]
    fn test_by_day_first_encountered_order() {
        let table = BucketTable::by_day(&stream());
        assert_eq!(table.labels(), ["2018-02-18", "2018-02-15", "2018-02-12"]);
        assert_eq!(table.authors(), ["Anna", "Bertil"]);
        assert_eq!(table.count("2018-02-15", "Anna"), 1);
        assert_eq!(table.count("2018-02-15", "Bertil"), 1);
        assert_eq!(table.bucket_total("2018-02-15"), 2);
        assert_eq!(table.series("Anna"), Some(&[1, 1, 1][..]));
        assert_eq!(table.series("Bertil"), Some(&[0, 1, 0][..]));
    }

    #[test]
    fn test_by_weekday_calendar_order() {
        let table = BucketTable::by_weekday(&stream());
        assert_eq!(table.labels(), ["Monday", "Thursday", "Sunday"]);
        assert_eq!(table.count("Thursday", "Anna"), 1);
        assert_eq!(table.count("Tuesday", "Anna"), 0);
    }

    #[test]
    fn test_by_half_hour_wraps_midnight() {
        let table = BucketTable::by_half_hour(&stream());
        assert_eq!(table.labels(), ["00:00", "12:30", "12:00", "08:30"]);
        assert_eq!(table.count("00:00", "Anna"), 1);
    }

    #[test]
    fn test_exact_author_match() {
        let stream: RecordStream = [
            record("Ann", 2018, 1, 1, 10, 0),
            record("Anna", 2018, 1, 1, 10, 0),
        ]
        .into_iter()
        .collect();
        let table = BucketTable::by_day(&stream);
        assert_eq!(table.count("2018-01-01", "Ann"), 1);
        assert_eq!(table.count("2018-01-01", "Anna"), 1);
    }

    #[test]
    fn test_totals_match_stream_length() {
        let stream = stream();
        for kind in [BucketKind::Day, BucketKind::Weekday, BucketKind::HalfHour] {
            assert_eq!(BucketTable::from_stream(kind, &stream).total(), stream.len());
        }
    }

    #[test]
    fn test_empty_stream() {
        let table = BucketTable::by_weekday(&RecordStream::new());
        assert!(table.labels().is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.series("Anna"), None);
    }
}
