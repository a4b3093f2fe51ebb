//! Normalized message records and the record stream.
//!
//! This module provides [`MessageRecord`], one cleaned message extracted from
//! one block of the export, and [`RecordStream`], the ordered collection the
//! aggregators and writers consume.
//!
//! # Overview
//!
//! A record consists of:
//! - `text` (sanitized) and `author`
//! - a [`CanonicalTimestamp`] (`YYYY-MM-DD HH:MM:00 Weekday`)
//! - `call_duration_minutes` (zero for ordinary messages)
//! - `stripped_tags`, the kinds of embedded markup removed from the text
//!
//! # Examples
//!
//! ```
//! use chatstats::message::{CanonicalTimestamp, MessageRecord};
//! use chrono::NaiveDate;
//!
//! let ts = CanonicalTimestamp::new(NaiveDate::from_ymd_opt(2018, 2, 15).unwrap(), 12, 40).unwrap();
//! let record = MessageRecord::new("Hej 🙂", "Alice", ts);
//!
//! assert_eq!(record.timestamp().to_string(), "2018-02-15 12:40:00 Thursday");
//! assert_eq!(record.call_duration_minutes(), 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ChatstatsError;

/// English weekday names in Monday..Sunday order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Returns the full English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// A send time normalized to minute precision, with its weekday.
///
/// Displays and serializes as `YYYY-MM-DD HH:MM:00 Weekday`. Seconds are
/// always zero because the export does not carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTimestamp {
    datetime: NaiveDateTime,
}

impl CanonicalTimestamp {
    /// Builds a timestamp from a date and a clock time.
    ///
    /// Returns `None` for an impossible clock time.
    pub fn new(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self {
            datetime: date.and_time(time),
        })
    }

    /// Returns the date and time.
    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    /// Returns the calendar date.
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// Returns the hour (0..=23).
    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    /// Returns the minute (0..=59).
    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    /// Returns the weekday of the date (proleptic Gregorian).
    pub fn weekday(&self) -> Weekday {
        self.datetime.weekday()
    }

    /// Returns the full English weekday name.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday())
    }
}

impl fmt::Display for CanonicalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.datetime.format("%Y-%m-%d %H:%M:00"),
            self.weekday_name()
        )
    }
}

impl FromStr for CanonicalTimestamp {
    type Err = ChatstatsError;

    /// Parses the canonical form back; the weekday must match the date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stamp, weekday) = s
            .rsplit_once(' ')
            .ok_or_else(|| ChatstatsError::malformed_timestamp(s, "missing weekday"))?;
        let datetime = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| ChatstatsError::malformed_timestamp(s, e.to_string()))?;
        let parsed = Self::new(datetime.date(), datetime.hour(), datetime.minute())
            .ok_or_else(|| ChatstatsError::malformed_timestamp(s, "invalid clock time"))?;
        if parsed.weekday_name() != weekday {
            return Err(ChatstatsError::malformed_timestamp(
                s,
                format!("weekday {weekday} does not match date"),
            ));
        }
        Ok(parsed)
    }
}

impl Serialize for CanonicalTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One cleaned message from one block of the export.
///
/// Records are immutable once produced; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    text: String,
    author: String,
    timestamp: CanonicalTimestamp,
    #[serde(default)]
    call_duration_minutes: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    stripped_tags: Vec<String>,
}

impl MessageRecord {
    /// Creates a record with no call duration and no stripped tags.
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        timestamp: CanonicalTimestamp,
    ) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            timestamp,
            call_duration_minutes: 0.0,
            stripped_tags: Vec::new(),
        }
    }

    /// Builder method to set the call duration in minutes.
    #[must_use]
    pub fn with_call_duration(mut self, minutes: f64) -> Self {
        self.call_duration_minutes = minutes.max(0.0);
        self
    }

    /// Builder method to set the stripped markup kinds.
    #[must_use]
    pub fn with_stripped_tags(mut self, tags: Vec<String>) -> Self {
        self.stripped_tags = tags;
        self
    }

    /// Returns the sanitized message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the normalized send time.
    pub fn timestamp(&self) -> &CanonicalTimestamp {
        &self.timestamp
    }

    /// Returns the call length in minutes (0 for ordinary messages).
    pub fn call_duration_minutes(&self) -> f64 {
        self.call_duration_minutes
    }

    /// Returns the element names of markup removed from the text.
    pub fn stripped_tags(&self) -> &[String] {
        &self.stripped_tags
    }

    /// Returns `true` if this record describes a call.
    pub fn is_call(&self) -> bool {
        self.call_duration_minutes > 0.0
    }
}

/// Ordered records of one export plus the total call time.
///
/// Record order is document order. The parallel views
/// [`texts`](Self::texts), [`authors`](Self::authors) and
/// [`timestamps`](Self::timestamps) always have the same length and index `i`
/// of each describes the same block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStream {
    records: Vec<MessageRecord>,
    total_call_minutes: f64,
}

impl RecordStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stream with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            total_call_minutes: 0.0,
        }
    }

    /// Appends a record and adds its call time to the running total.
    pub fn push(&mut self, record: MessageRecord) {
        self.total_call_minutes += record.call_duration_minutes;
        self.records.push(record);
    }

    /// Returns the records in document order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the stream has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the sum of call durations across all records, in minutes.
    pub fn total_call_minutes(&self) -> f64 {
        self.total_call_minutes
    }

    /// Returns all texts, index-aligned with the other views.
    pub fn texts(&self) -> Vec<&str> {
        self.records.iter().map(MessageRecord::text).collect()
    }

    /// Returns all authors, index-aligned with the other views.
    pub fn authors(&self) -> Vec<&str> {
        self.records.iter().map(MessageRecord::author).collect()
    }

    /// Returns all timestamps, index-aligned with the other views.
    pub fn timestamps(&self) -> Vec<CanonicalTimestamp> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    /// Consumes the stream, returning the records.
    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }
}

impl FromIterator<MessageRecord> for RecordStream {
    fn from_iter<I: IntoIterator<Item = MessageRecord>>(iter: I) -> Self {
        let mut stream = RecordStream::new();
        for record in iter {
            stream.push(record);
        }
        stream
    }
}

impl IntoIterator for RecordStream {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordStream {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
