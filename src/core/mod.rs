//! Aggregators over a parsed record stream.
//!
//! This module contains:
//! - [`emoji`] - Emoji classification, frequency table and ranking
//! - [`words`] - Word counting
//! - [`buckets`] - Message counts per day, weekday and half hour
//! - [`summary`] - Headline numbers and per-author totals
//! - [`report`] - All of the above as one serializable document
//! - [`output`] - Record writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatstats::core::{BucketTable, EmojiFrequencyTable, Summary};
//! use chatstats::message::{MessageRecord, RecordStream};
//! use chrono::NaiveDate;
//!
//! let ts = "2018-02-15 12:40:00 Thursday".parse()?;
//! let stream: RecordStream = [MessageRecord::new("hej 😀", "Anna", ts)].into_iter().collect();
//!
//! let emoji = EmojiFrequencyTable::from_stream(&stream);
//! let weekdays = BucketTable::by_weekday(&stream);
//! let summary = Summary::compute(&stream, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap());
//!
//! assert_eq!(emoji.count('😀'), 1);
//! assert_eq!(weekdays.labels(), ["Thursday"]);
//! assert_eq!(summary.days_in_touch, 14);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

pub mod buckets;
pub mod emoji;
pub mod output;
pub mod report;
pub mod summary;
pub mod words;

pub use buckets::{BucketKind, BucketTable, half_hour_bucket};
pub use emoji::{EmojiCount, EmojiFrequencyTable, is_emoji};
pub use report::{AuthorEmojiRow, Report};
pub use summary::{AuthorTotals, Summary};
pub use words::{total_words, word_count};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
