//! Lexical lookup tables used while cleaning message text and timestamps.
//!
//! Three flat tables drive normalization:
//!
//! | Table | File | Purpose |
//! |-------|------|---------|
//! | [`LexicalFixMap`] | `bad_unicode_fix.json` | Single-character repair of corrupted code points |
//! | [`AsciiEmojiMap`] | `ascii_to_emoji.json` | Ascii smileys such as `:)` to unicode emoji |
//! | [`MonthMap`] | `month_converter.json` | Localized month names to month numbers |
//!
//! They are bundled in a [`Lexicon`], built once before parsing and shared
//! read-only afterwards. Swapping `month_converter.json` switches the input
//! locale.
//!
//! # Example
//!
//! ```rust
//! use chatstats::lexicon::Lexicon;
//!
//! let lexicon = Lexicon::builtin()?;
//! assert_eq!(lexicon.months().get("februari"), Some(2));
//! assert_eq!(lexicon.ascii_emoji().apply("hej :)"), "hej 🙂");
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChatstatsError, Result};

/// File name of the corrupted-character table inside a lexicon directory.
pub const FIX_MAP_FILE: &str = "bad_unicode_fix.json";
/// File name of the ascii smiley table inside a lexicon directory.
pub const ASCII_EMOJI_FILE: &str = "ascii_to_emoji.json";
/// File name of the month table inside a lexicon directory.
pub const MONTH_FILE: &str = "month_converter.json";

const BUILTIN_FIX_MAP: &str = include_str!("../conversion/bad_unicode_fix.json");
const BUILTIN_ASCII_EMOJI: &str = include_str!("../conversion/ascii_to_emoji.json");
const BUILTIN_MONTHS: &str = include_str!("../conversion/month_converter.json");

/// Code points above this are treated as suspicious leftovers of broken
/// vendor emoji encodings.
pub const SUSPICIOUS_CODE_POINT: u32 = 1_000_000;

/// Parses a flat JSON string-to-string object, tolerating a UTF-8 BOM.
fn parse_table(content: &str) -> Result<BTreeMap<String, String>> {
    Ok(serde_json::from_str(content.trim_start_matches('\u{feff}'))?)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// ============================================================================
// LexicalFixMap
// ============================================================================

/// Mapping from a corrupted character to its corrected character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalFixMap {
    map: HashMap<char, char>,
}

impl LexicalFixMap {
    /// Creates an empty map that leaves all text untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the map from a JSON object of single-character keys and values.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let table = parse_table(content)?;
        let mut map = HashMap::with_capacity(table.len());
        for (key, value) in table {
            let (Some(from), Some(to)) = (single_char(&key), single_char(&value)) else {
                return Err(ChatstatsError::lexicon(
                    None,
                    format!("fix map entries must be single characters, got {key:?} -> {value:?}"),
                ));
            };
            map.insert(from, to);
        }
        Ok(Self { map })
    }

    /// Builds a map from a paired listing of corrupted and fixed text.
    ///
    /// Lines starting with `1; ` hold corrupted characters and lines starting
    /// with `2; ` hold their fixed counterparts; the two sequences are zipped
    /// character by character. The first mapping for a character wins.
    ///
    /// ```rust
    /// use chatstats::lexicon::LexicalFixMap;
    ///
    /// let map = LexicalFixMap::from_paired_listing("1; \u{e415}\u{e022}\n2; 😄❤\n");
    /// assert_eq!(map.apply("\u{e415}"), "😄");
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn from_paired_listing(listing: &str) -> Self {
        let mut corrupted = Vec::new();
        let mut fixed = Vec::new();
        for line in listing.lines() {
            if let Some(rest) = line.strip_prefix("1; ") {
                corrupted.extend(rest.chars());
            } else if let Some(rest) = line.strip_prefix("2; ") {
                fixed.extend(rest.chars());
            }
        }

        let mut map = HashMap::new();
        for (from, to) in corrupted.into_iter().zip(fixed) {
            if from != to {
                map.entry(from).or_insert(to);
            }
        }
        Self { map }
    }

    /// Returns the replacement for `c`, if it is a known corrupted character.
    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    /// Replaces every mapped character in `text`.
    pub fn apply(&self, text: &str) -> String {
        if self.map.is_empty() {
            return text.to_string();
        }
        text.chars()
            .map(|c| self.map.get(&c).copied().unwrap_or(c))
            .collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the entries as a JSON string in the lexicon file format.
    pub fn to_json_string(&self) -> Result<String> {
        let table: BTreeMap<String, String> = self
            .map
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Ok(serde_json::to_string_pretty(&table)?)
    }
}

impl FromIterator<(char, char)> for LexicalFixMap {
    fn from_iter<I: IntoIterator<Item = (char, char)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// AsciiEmojiMap
// ============================================================================

/// Mapping from ascii smileys to unicode emoji.
///
/// Substitution is a single left-to-right scan. At every position the longest
/// token that matches wins, so `>:(` is never split into `>` + `:(`, and
/// inserted emoji are never rescanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsciiEmojiMap {
    /// Candidates grouped by first character, longest token first.
    by_first: HashMap<char, Vec<(String, String)>>,
    len: usize,
}

impl AsciiEmojiMap {
    /// Creates an empty map that leaves all text untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the map from a JSON object of token to emoji.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(parse_table(content)?.into_iter().collect())
    }

    /// Returns the emoji for an exact token.
    pub fn get(&self, token: &str) -> Option<&str> {
        let first = token.chars().next()?;
        self.by_first
            .get(&first)?
            .iter()
            .find(|(k, _)| k == token)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every known token in `text`, longest match first.
    pub fn apply(&self, text: &str) -> String {
        if self.by_first.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while let Some(c) = text[pos..].chars().next() {
            let rest = &text[pos..];
            let hit = self
                .by_first
                .get(&c)
                .and_then(|candidates| candidates.iter().find(|(k, _)| rest.starts_with(k.as_str())));
            match hit {
                Some((token, emoji)) => {
                    out.push_str(emoji);
                    pos += token.len();
                }
                None => {
                    out.push(c);
                    pos += c.len_utf8();
                }
            }
        }
        out
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map has no tokens.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AsciiEmojiMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut by_first: HashMap<char, Vec<(String, String)>> = HashMap::new();
        let mut len = 0;
        for (token, emoji) in iter {
            let token = token.into();
            let Some(first) = token.chars().next() else {
                continue;
            };
            let bucket = by_first.entry(first).or_default();
            match bucket.iter_mut().find(|(k, _)| *k == token) {
                Some(entry) => entry.1 = emoji.into(),
                None => {
                    bucket.push((token, emoji.into()));
                    len += 1;
                }
            }
        }
        for bucket in by_first.values_mut() {
            bucket.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        }
        Self { by_first, len }
    }
}

// ============================================================================
// MonthMap
// ============================================================================

/// Mapping from localized month names to month numbers (1..=12).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthMap {
    map: HashMap<String, u32>,
}

impl MonthMap {
    /// Loads the map from a JSON object of month name to two-digit number.
    ///
    /// ```rust
    /// use chatstats::lexicon::MonthMap;
    ///
    /// let months = MonthMap::from_json_str(r#"{"februari": "02"}"#)?;
    /// assert_eq!(months.get("februari"), Some(2));
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self> {
        let table = parse_table(content)?;
        let mut map = HashMap::with_capacity(table.len());
        for (name, number) in table {
            let month = number
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(|| {
                    ChatstatsError::lexicon(
                        None,
                        format!("month value {number:?} for {name:?} is not in 01..12"),
                    )
                })?;
            map.insert(name, month);
        }
        Ok(Self { map })
    }

    /// Looks up a month name, falling back to its lower-cased form.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.map
            .get(name)
            .or_else(|| self.map.get(&name.to_lowercase()))
            .copied()
    }

    /// Returns the number of month names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map has no month names.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for MonthMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ============================================================================
// Lexicon
// ============================================================================

/// The three lookup tables used by one parsing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    fixes: LexicalFixMap,
    ascii_emoji: AsciiEmojiMap,
    months: MonthMap,
}

impl Lexicon {
    /// Bundles already-built tables.
    pub fn new(fixes: LexicalFixMap, ascii_emoji: AsciiEmojiMap, months: MonthMap) -> Self {
        Self {
            fixes,
            ascii_emoji,
            months,
        }
    }

    /// The tables shipped with the crate (Swedish month names).
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            fixes: LexicalFixMap::from_json_str(BUILTIN_FIX_MAP)?,
            ascii_emoji: AsciiEmojiMap::from_json_str(BUILTIN_ASCII_EMOJI)?,
            months: MonthMap::from_json_str(BUILTIN_MONTHS)?,
        })
    }

    /// Loads all three tables from a directory.
    ///
    /// Expects [`FIX_MAP_FILE`], [`ASCII_EMOJI_FILE`] and [`MONTH_FILE`].
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let fixes = load_file(&dir.join(FIX_MAP_FILE), LexicalFixMap::from_json_str)?;
        let ascii_emoji = load_file(&dir.join(ASCII_EMOJI_FILE), AsciiEmojiMap::from_json_str)?;
        let months = load_file(&dir.join(MONTH_FILE), MonthMap::from_json_str)?;

        tracing::debug!(
            dir = %dir.display(),
            fixes = fixes.len(),
            ascii_emoji = ascii_emoji.len(),
            months = months.len(),
            "loaded lexicon"
        );

        Ok(Self {
            fixes,
            ascii_emoji,
            months,
        })
    }

    /// Replaces the month table, switching the supported input locale.
    #[must_use]
    pub fn with_months(mut self, months: MonthMap) -> Self {
        self.months = months;
        self
    }

    /// Returns the corrupted-character table.
    pub fn fixes(&self) -> &LexicalFixMap {
        &self.fixes
    }

    /// Returns the ascii smiley table.
    pub fn ascii_emoji(&self) -> &AsciiEmojiMap {
        &self.ascii_emoji
    }

    /// Returns the month table.
    pub fn months(&self) -> &MonthMap {
        &self.months
    }
}

fn load_file<T>(path: &Path, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    let content = fs::read_to_string(path)?;
    parse(&content).map_err(|err| with_path(err, path.to_path_buf()))
}

fn with_path(err: ChatstatsError, path: PathBuf) -> ChatstatsError {
    match err {
        ChatstatsError::Lexicon { path: None, message } => ChatstatsError::lexicon(Some(path), message),
        ChatstatsError::Json(source) => ChatstatsError::lexicon(Some(path), source.to_string()),
        other => other,
    }
}

/// Lists characters above [`SUSPICIOUS_CODE_POINT`] in first-seen order.
///
/// These are usually vendor emoji that survived as private-use code points
/// and are candidates for new [`LexicalFixMap`] entries.
pub fn find_suspicious_chars(text: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars() {
        if c as u32 > SUSPICIOUS_CODE_POINT && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.months().len(), 12);
        assert!(!lexicon.fixes().is_empty());
        assert!(!lexicon.ascii_emoji().is_empty());
    }

    #[test]
    fn test_month_lookup_falls_back_to_lowercase() {
        let months = MonthMap::from_json_str(r#"{"februari": "02", "december": "12"}"#).unwrap();
        assert_eq!(months.get("februari"), Some(2));
        assert_eq!(months.get("Februari"), Some(2));
        assert_eq!(months.get("december"), Some(12));
        assert_eq!(months.get("february"), None);
    }

    #[test]
    fn test_month_value_out_of_range() {
        let err = MonthMap::from_json_str(r#"{"smarch": "13"}"#).unwrap_err();
        assert!(err.to_string().contains("smarch"));
    }

    #[test]
    fn test_month_table_with_bom() {
        let months = MonthMap::from_json_str("\u{feff}{\"mars\": \"03\"}").unwrap();
        assert_eq!(months.get("mars"), Some(3));
    }

    #[test]
    fn test_fix_map_apply() {
        let map: LexicalFixMap = [('\u{e415}', '😄'), ('\u{e022}', '❤')].into_iter().collect();
        assert_eq!(map.apply("hej \u{e415}\u{e415} \u{e022}"), "hej 😄😄 ❤");
        assert_eq!(map.apply("untouched"), "untouched");
        assert_eq!(map.get('\u{e022}'), Some('❤'));
        assert_eq!(map.get('a'), None);
    }

    #[test]
    fn test_fix_map_rejects_multichar_entries() {
        assert!(LexicalFixMap::from_json_str(r#"{"ab": "c"}"#).is_err());
        assert!(LexicalFixMap::from_json_str(r#"{"a": ""}"#).is_err());
    }

    #[test]
    fn test_fix_map_from_paired_listing_first_wins() {
        let listing = "1; ab\n2; xy\n1; a\n2; z\n";
        let map = LexicalFixMap::from_paired_listing(listing);
        assert_eq!(map.get('a'), Some('x'));
        assert_eq!(map.get('b'), Some('y'));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_fix_map_json_roundtrip() {
        let map: LexicalFixMap = [('\u{e415}', '😄')].into_iter().collect();
        let json = map.to_json_string().unwrap();
        assert_eq!(LexicalFixMap::from_json_str(&json).unwrap(), map);
    }

    #[test]
    fn test_ascii_emoji_longest_match_first() {
        let map: AsciiEmojiMap = [(":(", "🙁"), (">:(", "😠"), (":-(", "🙁")].into_iter().collect();
        assert_eq!(map.apply(">:("), "😠");
        assert_eq!(map.apply("a :( b :-( c"), "a 🙁 b 🙁 c");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_ascii_emoji_no_rescan_of_output() {
        let map: AsciiEmojiMap = [("<3", "<3<3")].into_iter().collect();
        assert_eq!(map.apply("<3"), "<3<3");
    }

    #[test]
    fn test_ascii_emoji_multibyte_text() {
        let map: AsciiEmojiMap = [(":)", "🙂")].into_iter().collect();
        assert_eq!(map.apply("Hallå :) på dig"), "Hallå 🙂 på dig");
        assert_eq!(map.apply(""), "");
    }

    #[test]
    fn test_ascii_emoji_get() {
        let map = AsciiEmojiMap::from_json_str(r#"{":)": "🙂", ":\\": "😕"}"#).unwrap();
        assert_eq!(map.get(":)"), Some("🙂"));
        assert_eq!(map.get(":\\"), Some("😕"));
        assert_eq!(map.get(":/"), None);
        assert_eq!(map.get(""), None);
    }

    #[test]
    fn test_ascii_emoji_duplicate_tokens_count_once() {
        let map: AsciiEmojiMap = [(":)", "🙂"), (":)", "😊")].into_iter().collect();
        assert_eq!(map.len(), 1);
        assert_eq!(map.apply(":)"), "😊");
    }

    #[test]
    fn test_load_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FIX_MAP_FILE), r#"{"\ue415": "😄"}"#).unwrap();
        fs::write(dir.path().join(ASCII_EMOJI_FILE), r#"{":)": "🙂"}"#).unwrap();
        fs::write(dir.path().join(MONTH_FILE), r#"{"february": "02"}"#).unwrap();

        let lexicon = Lexicon::load_dir(dir.path()).unwrap();
        assert_eq!(lexicon.months().get("february"), Some(2));
        assert_eq!(lexicon.fixes().len(), 1);
    }

    #[test]
    fn test_load_dir_reports_bad_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FIX_MAP_FILE), "{}").unwrap();
        fs::write(dir.path().join(ASCII_EMOJI_FILE), "{}").unwrap();
        fs::write(dir.path().join(MONTH_FILE), "not json").unwrap();

        let err = Lexicon::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains(MONTH_FILE));
    }

    #[test]
    fn test_load_dir_missing_file_is_io() {
        let dir = tempdir().unwrap();
        assert!(Lexicon::load_dir(dir.path()).unwrap_err().is_io());
    }

    #[test]
    fn test_with_months_swaps_locale() {
        let english: MonthMap = [("february", 2)].into_iter().collect();
        let lexicon = Lexicon::builtin().unwrap().with_months(english);
        assert_eq!(lexicon.months().get("february"), Some(2));
        assert_eq!(lexicon.months().get("februari"), None);
    }

    #[test]
    fn test_find_suspicious_chars() {
        let text = "ok \u{10FFFD} again \u{10FFFD} and \u{F4241}";
        assert_eq!(find_suspicious_chars(text), vec!['\u{10FFFD}', '\u{F4241}']);
        assert!(find_suspicious_chars("plain 😀").is_empty());
    }
}
