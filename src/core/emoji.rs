//! Emoji classification and frequency counting.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::message::RecordStream;

/// Everything above this code point (U+1F600, the first emoticon) counts as
/// an emoji, whether or not it is in the known ranges.
pub const EMOJI_THRESHOLD: u32 = 0x1F600;

/// Default size of the global ranking.
pub const DEFAULT_TOP_EMOJIS: usize = 20;

/// Returns `true` if `c` counts as an emoji.
///
/// A character is an emoji when it falls in one of the known emoji ranges
/// or its code point is above [`EMOJI_THRESHOLD`]. Joiners, variation
/// selectors and the keycap combiner are not emoji on their own.
///
/// ```rust
/// use chatstats::core::emoji::is_emoji;
///
/// assert!(is_emoji('😀'));
/// assert!(is_emoji('❤'));
/// assert!(!is_emoji('a'));
/// assert!(!is_emoji('\u{200d}'));
/// ```
pub fn is_emoji(c: char) -> bool {
    let code = c as u32;
    code > EMOJI_THRESHOLD || is_known_emoji(code)
}

fn is_known_emoji(code: u32) -> bool {
    matches!(
        code,
        0x00A9 | 0x00AE // copyright, registered
            | 0x203C | 0x2049 // double exclamation, exclamation question
            | 0x2122 | 0x2139
            | 0x2194..=0x2199 // arrows
            | 0x21A9..=0x21AA
            | 0x231A..=0x231B // watch, hourglass
            | 0x2328 | 0x23CF
            | 0x23E9..=0x23F3
            | 0x23F8..=0x23FA
            | 0x24C2
            | 0x25AA..=0x25AB | 0x25B6 | 0x25C0 | 0x25FB..=0x25FE
            | 0x2600..=0x26FF // Miscellaneous Symbols
            | 0x2700..=0x27BF // Dingbats
            | 0x2934..=0x2935
            | 0x2B05..=0x2B07 | 0x2B1B..=0x2B1C | 0x2B50 | 0x2B55
            | 0x3030 | 0x303D | 0x3297 | 0x3299
            | 0x1F000..=0x1F0FF // Mahjong, domino and playing cards
            | 0x1F100..=0x1F1FF // Enclosed alphanumerics, regional indicators
            | 0x1F200..=0x1F2FF // Enclosed ideographic supplement
            | 0x1F300..=0x1F5FF // Miscellaneous Symbols and Pictographs
    ) || code == EMOJI_THRESHOLD
}

/// One entry of an emoji ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    /// The emoji character.
    pub emoji: char,
    /// How many times it was used.
    pub count: usize,
}

/// Emoji usage per author and in total.
///
/// Authors are kept in first-encountered order.
#[derive(Debug, Clone, Default)]
pub struct EmojiFrequencyTable {
    authors: Vec<String>,
    per_author: HashMap<String, HashMap<char, usize>>,
    global: HashMap<char, usize>,
}

impl EmojiFrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every emoji in every record of `stream`.
    pub fn from_stream(stream: &RecordStream) -> Self {
        let mut table = Self::new();
        for record in stream {
            table.add(record.author(), record.text());
        }
        table
    }

    /// Counts the emoji in one message from `author`.
    pub fn add(&mut self, author: &str, text: &str) {
        for c in text.chars().filter(|&c| is_emoji(c)) {
            if !self.per_author.contains_key(author) {
                self.authors.push(author.to_string());
                self.per_author.insert(author.to_string(), HashMap::new());
            }
            if let Some(counts) = self.per_author.get_mut(author) {
                *counts.entry(c).or_insert(0) += 1;
            }
            *self.global.entry(c).or_insert(0) += 1;
        }
    }

    /// Returns the global count for `emoji`.
    pub fn count(&self, emoji: char) -> usize {
        self.global.get(&emoji).copied().unwrap_or(0)
    }

    /// Returns how often `author` used `emoji`.
    pub fn author_count(&self, author: &str, emoji: char) -> usize {
        self.per_author
            .get(author)
            .and_then(|counts| counts.get(&emoji))
            .copied()
            .unwrap_or(0)
    }

    /// Authors that used at least one emoji, in first-encountered order.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(String::as_str)
    }

    /// Total number of emoji seen.
    pub fn total(&self) -> usize {
        self.global.values().sum()
    }

    /// Number of distinct emoji seen.
    pub fn distinct(&self) -> usize {
        self.global.len()
    }

    /// Returns `true` if no emoji were counted.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }

    /// The `n` most used emoji, most used first.
    ///
    /// Equal counts are ordered by ascending code point, so the ranking is
    /// the same on every run.
    ///
    /// ```rust
    /// use chatstats::core::emoji::EmojiFrequencyTable;
    ///
    /// let mut table = EmojiFrequencyTable::new();
    /// table.add("Anna", "😂😂🙂");
    /// table.add("Bertil", "😂❤");
    ///
    /// let top: Vec<char> = table.top_emojis(2).iter().map(|e| e.emoji).collect();
    /// assert_eq!(top, vec!['😂', '❤']);
    /// ```
    pub fn top_emojis(&self, n: usize) -> Vec<EmojiCount> {
        let mut ranking: Vec<EmojiCount> = self
            .global
            .iter()
            .map(|(&emoji, &count)| EmojiCount { emoji, count })
            .collect();
        ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.emoji.cmp(&b.emoji)));
        ranking.truncate(n);
        ranking
    }

    /// Per-author counts for the given emoji, zero-filled.
    ///
    /// Returns one row per author (first-encountered order); column `i` is
    /// that author's count of `emojis[i]`.
    pub fn author_matrix(&self, emojis: &[char]) -> Vec<(String, Vec<usize>)> {
        self.authors
            .iter()
            .map(|author| {
                let row = emojis.iter().map(|&e| self.author_count(author, e)).collect();
                (author.clone(), row)
            })
            .collect()
    }
}
