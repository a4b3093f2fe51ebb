//! Run summary and per-author totals.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::words::{total_words, word_count};
use crate::message::{CanonicalTimestamp, RecordStream};

/// Message and word totals of one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorTotals {
    /// Author name as it appears in the export.
    pub author: String,
    /// Messages sent.
    pub messages: usize,
    /// Words written, counted with [`word_count`].
    pub words: usize,
}

impl AuthorTotals {
    /// Totals for every author, in first-encountered order.
    ///
    /// ```rust
    /// use chatstats::core::summary::AuthorTotals;
    /// use chatstats::message::{CanonicalTimestamp, MessageRecord, RecordStream};
    ///
    /// let ts: CanonicalTimestamp = "2018-02-15 12:40:00 Thursday".parse()?;
    /// let stream: RecordStream = [
    ///     MessageRecord::new("hej på dig", "Anna", ts),
    ///     MessageRecord::new("tjena", "Bertil", ts),
    ///     MessageRecord::new("hej då", "Anna", ts),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let totals = AuthorTotals::from_stream(&stream);
    /// assert_eq!(totals[0].author, "Anna");
    /// assert_eq!(totals[0].messages, 2);
    /// assert_eq!(totals[0].words, 5);
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    pub fn from_stream(stream: &RecordStream) -> Vec<Self> {
        let mut totals: Vec<Self> = Vec::new();
        for record in stream {
            let words = word_count(record.text());
            match totals.iter_mut().find(|t| t.author == record.author()) {
                Some(entry) => {
                    entry.messages += 1;
                    entry.words += words;
                }
                None => totals.push(Self {
                    author: record.author().to_string(),
                    messages: 1,
                    words,
                }),
            }
        }
        totals
    }
}

/// Headline numbers of one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Earliest message time; `None` for an empty export.
    pub first_message: Option<CanonicalTimestamp>,
    /// Latest message time; `None` for an empty export.
    pub last_message: Option<CanonicalTimestamp>,
    /// Whole days from the first message's date to `today`.
    pub days_in_touch: i64,
    /// Number of messages.
    pub messages: usize,
    /// Messages divided by days in touch (at least one day).
    pub average_per_day: f64,
    /// Sum of word counts.
    pub total_words: usize,
    /// Words divided by messages.
    pub average_words_per_message: f64,
    /// Total call time in minutes.
    pub call_minutes: f64,
}

impl Summary {
    /// Computes the summary of `stream` as seen on `today`.
    pub fn compute(stream: &RecordStream, today: NaiveDate) -> Self {
        let first_message = stream.iter().map(|r| *r.timestamp()).min();
        let last_message = stream.iter().map(|r| *r.timestamp()).max();

        let days_in_touch = first_message
            .map(|first| (today - first.date()).num_days().max(0))
            .unwrap_or(0);

        let messages = stream.len();
        let total_words = total_words(stream);

        let average_per_day = if messages == 0 {
            0.0
        } else {
            messages as f64 / days_in_touch.max(1) as f64
        };
        let average_words_per_message = if messages == 0 {
            0.0
        } else {
            total_words as f64 / messages as f64
        };

        Self {
            first_message,
            last_message,
            days_in_touch,
            messages,
            average_per_day,
            total_words,
            average_words_per_message,
            call_minutes: stream.total_call_minutes(),
        }
    }
}
