//! Configuration types for the parser and the aggregators.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. All of them are serde-enabled so a
//! changed export layout can be supplied as a JSON file instead of a code
//! change.
//!
//! - [`ExportLayout`] - CSS selectors that locate message blocks and their regions
//! - [`ParserConfig`] - Layout plus call-duration unit handling
//! - [`StatsConfig`] - Aggregator settings
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{ExportLayout, ParserConfig};
//!
//! let config = ParserConfig::new()
//!     .with_layout(ExportLayout::messenger_2018())
//!     .with_seconds_units(["sec", "sek", "s"]);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Selectors describing one version of the export markup.
///
/// Every message in the export is a block matched by [`block`](Self::block);
/// the other selectors are evaluated inside that block. The class names are
/// generated by the exporter and change between export versions, so treat
/// them as versioned data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLayout {
    /// Version label, only used in logs.
    #[serde(default = "default_version")]
    pub version: String,

    /// One message block.
    pub block: String,

    /// Sender name inside a block.
    pub author: String,

    /// Message body inside a block.
    pub text: String,

    /// Localized send time inside a block.
    pub timestamp: String,

    /// Call length label, present only on call blocks.
    pub call_duration: String,
}

fn default_version() -> String {
    "custom".to_string()
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::messenger_2018()
    }
}

impl ExportLayout {
    /// The Messenger HTML export layout used since 2018.
    pub fn messenger_2018() -> Self {
        Self {
            version: "messenger-2018".to_string(),
            block: "div.pam._3-95._2pi0._2lej.uiBoxWhite.noborder".to_string(),
            author: "div._3-96._2pio._2lek._2lel".to_string(),
            text: "div._3-96._2let".to_string(),
            timestamp: "div._3-94._2lem".to_string(),
            call_duration: "span._idm".to_string(),
        }
    }

    /// Loads a layout from a JSON file.
    ///
    /// ```json
    /// {"block": "div.message", "author": "span.user", "text": "p",
    ///  "timestamp": "span.meta", "call_duration": "span.call"}
    /// ```
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(content.trim_start_matches('\u{feff}'))?)
    }
}

/// Configuration for [`MessengerParser`](crate::parser::MessengerParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Markup layout of the export.
    pub layout: ExportLayout,

    /// Unit spellings meaning "seconds" in call durations (matched as
    /// case-insensitive substrings). Any other unit is read as minutes.
    pub seconds_units: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            layout: ExportLayout::default(),
            seconds_units: vec!["sec".to_string(), "sek".to_string()],
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the export layout.
    #[must_use]
    pub fn with_layout(mut self, layout: ExportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the list of "seconds" unit spellings.
    #[must_use]
    pub fn with_seconds_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seconds_units = units.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for the aggregators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// How many emojis the global ranking keeps (default: 20)
    pub top_emojis: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { top_emojis: 20 }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the emoji ranking.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_layout_is_2018() {
        let layout = ExportLayout::default();
        assert_eq!(layout.version, "messenger-2018");
        assert!(layout.block.contains("uiBoxWhite"));
        assert_eq!(layout.call_duration, "span._idm");
    }

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new().with_seconds_units(["s"]);
        assert_eq!(config.seconds_units, vec!["s".to_string()]);
        assert_eq!(config.layout, ExportLayout::messenger_2018());
    }

    #[test]
    fn test_parser_config_default_units() {
        let config = ParserConfig::default();
        assert!(config.seconds_units.contains(&"sec".to_string()));
        assert!(config.seconds_units.contains(&"sek".to_string()));
    }

    #[test]
    fn test_stats_config() {
        assert_eq!(StatsConfig::default().top_emojis, 20);
        assert_eq!(StatsConfig::new().with_top_emojis(5).top_emojis, 5);
    }

    #[test]
    fn test_layout_from_json_file_without_version() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "\u{feff}{}",
            r#"{"block": "div.message", "author": "span.user", "text": "p",
               "timestamp": "span.meta", "call_duration": "span.call"}"#
        )
        .unwrap();

        let layout = ExportLayout::from_json_file(file.path()).unwrap();
        assert_eq!(layout.block, "div.message");
        assert_eq!(layout.version, "custom");
    }

    #[test]
    fn test_layout_from_json_file_missing_field() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"block": "div.message"}}"#).unwrap();

        assert!(ExportLayout::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ParserConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
