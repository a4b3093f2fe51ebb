//! Aggregate report.
//!
//! A [`Report`] bundles every aggregate of one export: the summary, per-author
//! totals, the emoji ranking with per-author counts, and the three time
//! bucket tables. It serializes to one JSON document that a chart renderer can
//! consume directly.

use std::fs::File;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::StatsConfig;
use crate::core::buckets::BucketTable;
use crate::core::emoji::{EmojiCount, EmojiFrequencyTable};
use crate::core::summary::{AuthorTotals, Summary};
use crate::error::Result;
use crate::message::RecordStream;

/// Per-author counts of the ranked emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorEmojiRow {
    /// Author name.
    pub author: String,
    /// Counts aligned with [`Report::top_emojis`].
    pub counts: Vec<usize>,
}

/// Every aggregate of one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Headline numbers.
    pub summary: Summary,
    /// Messages and words per author.
    pub authors: Vec<AuthorTotals>,
    /// Most used emoji, most used first.
    pub top_emojis: Vec<EmojiCount>,
    /// Per-author counts of `top_emojis`.
    pub emoji_by_author: Vec<AuthorEmojiRow>,
    /// Messages per calendar day.
    pub per_day: BucketTable,
    /// Messages per weekday.
    pub per_weekday: BucketTable,
    /// Messages per half hour of the day.
    pub per_half_hour: BucketTable,
}

impl Report {
    /// Computes the report of `stream` as seen on `today`.
    ///
    /// ```rust
    /// use chatstats::config::StatsConfig;
    /// use chatstats::core::Report;
    /// use chatstats::message::{MessageRecord, RecordStream};
    /// use chrono::NaiveDate;
    ///
    /// let ts = "2018-02-15 12:40:00 Thursday".parse()?;
    /// let stream: RecordStream = [MessageRecord::new("hej 😀", "Anna", ts)].into_iter().collect();
    ///
    /// let today = NaiveDate::from_ymd_opt(2018, 2, 16).unwrap();
    /// let report = Report::build(&stream, &StatsConfig::default(), today);
    /// assert_eq!(report.summary.messages, 1);
    /// assert_eq!(report.top_emojis[0].emoji, '😀');
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    pub fn build(stream: &RecordStream, config: &StatsConfig, today: NaiveDate) -> Self {
        let emoji = EmojiFrequencyTable::from_stream(stream);
        let top_emojis = emoji.top_emojis(config.top_emojis);
        let ranked: Vec<char> = top_emojis.iter().map(|e| e.emoji).collect();
        let emoji_by_author = emoji
            .author_matrix(&ranked)
            .into_iter()
            .map(|(author, counts)| AuthorEmojiRow { author, counts })
            .collect();

        tracing::debug!(
            records = stream.len(),
            distinct_emoji = emoji.distinct(),
            "built report"
        );

        Self {
            summary: Summary::compute(stream, today),
            authors: AuthorTotals::from_stream(stream),
            top_emojis,
            emoji_by_author,
            per_day: BucketTable::by_day(stream),
            per_weekday: BucketTable::by_weekday(stream),
            per_half_hour: BucketTable::by_half_hour(stream),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as JSON to `output_path`.
    pub fn write_json(&self, output_path: &str) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(output_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
