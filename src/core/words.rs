//! Word counting.
//!
//! A message's word count is the number of pieces it splits into on a single
//! space. Runs of spaces therefore count extra words and an empty message
//! counts as one word; totals stay comparable with earlier reports that used
//! the same rule.

use crate::message::RecordStream;

/// Counts the words of one message.
///
/// ```rust
/// use chatstats::core::words::word_count;
///
/// assert_eq!(word_count("hej på dig"), 3);
/// assert_eq!(word_count("hej  då"), 3);
/// assert_eq!(word_count(""), 1);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Sums [`word_count`] over every record.
pub fn total_words(stream: &RecordStream) -> usize {
    stream.iter().map(|r| word_count(r.text())).sum()
}
