//! Record stream assembly.
//!
//! [`MessengerParser`] walks every message block of an export and chains the
//! per-block stages from [`parsing`](crate::parsing): region extraction, text
//! sanitization, timestamp normalization and call-duration parsing. Each block
//! yields exactly one [`MessageRecord`]. The first failing block aborts the
//! whole run, so a returned [`RecordStream`] is always complete.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatstats::parser::{MessengerParser, Parser};
//! use std::path::Path;
//!
//! let parser = MessengerParser::new()?;
//! let stream = parser.parse(Path::new("messages.html"))?;
//! println!("{} messages, {:.1} call minutes", stream.len(), stream.total_call_minutes());
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use scraper::Html;

use crate::config::ParserConfig;
use crate::error::{ChatstatsError, Result};
use crate::lexicon::Lexicon;
use crate::message::{MessageRecord, RecordStream};
use crate::parsing::{Block, BlockExtractor, normalize_timestamp, sanitize};
use crate::progress::{ProgressCallback, ProgressTracker};

/// Common interface of export parsers.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError`] if the file cannot be read, is not UTF-8, or
    /// any block fails to parse.
    fn parse(&self, path: &Path) -> Result<RecordStream>;

    /// Parses export content already in memory.
    fn parse_str(&self, content: &str) -> Result<RecordStream>;

    /// Parses an export file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<RecordStream> {
        self.parse(Path::new(path))
    }
}

/// Parser for Messenger HTML exports.
pub struct MessengerParser {
    config: ParserConfig,
    lexicon: Arc<Lexicon>,
    extractor: BlockExtractor,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for MessengerParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerParser")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl MessengerParser {
    /// Creates a parser with the default layout and the built-in lexicon.
    pub fn new() -> Result<Self> {
        Self::with_config(ParserConfig::default(), Arc::new(Lexicon::builtin()?))
    }

    /// Creates a parser with custom configuration and lexicon.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidSelector`] if the layout's selectors
    /// do not compile.
    pub fn with_config(config: ParserConfig, lexicon: Arc<Lexicon>) -> Result<Self> {
        let extractor = BlockExtractor::new(&config.layout)?;
        Ok(Self {
            config,
            lexicon,
            extractor,
            progress: None,
        })
    }

    /// Sets a callback that receives progress after every block.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the lexicon shared by this parser.
    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// Parses an already built document tree.
    pub fn parse_html(&self, html: &Html) -> Result<RecordStream> {
        let total = self.extractor.count(html);
        tracing::info!(
            layout = %self.config.layout.version,
            blocks = total,
            "parsing export"
        );

        let mut tracker = ProgressTracker::new(total);
        let mut stream = RecordStream::with_capacity(total);

        for block in self.extractor.blocks(html) {
            let started = Instant::now();
            stream.push(self.parse_block(&block)?);

            let progress = tracker.tick(started.elapsed());
            if let Some(callback) = &self.progress {
                callback(progress);
            }
        }

        tracing::info!(
            records = stream.len(),
            call_minutes = stream.total_call_minutes(),
            "parsed export"
        );
        Ok(stream)
    }

    fn parse_block(&self, block: &Block<'_>) -> Result<MessageRecord> {
        let raw = block.extract()?;

        let clean = sanitize(&raw.text, &self.lexicon);
        if !clean.stripped_tags.is_empty() {
            tracing::debug!(block = raw.index, tags = ?clean.stripped_tags, "stripped markup");
        }

        let timestamp = normalize_timestamp(&raw.timestamp, self.lexicon.months())
            .map_err(|e| e.at_block(raw.index))?;

        let minutes = raw
            .call_duration
            .as_ref()
            .map_or(0.0, |call| call.minutes(&self.config.seconds_units));

        Ok(MessageRecord::new(clean.text, raw.author, timestamp)
            .with_call_duration(minutes)
            .with_stripped_tags(clean.stripped_tags))
    }
}

impl Parser for MessengerParser {
    fn name(&self) -> &'static str {
        "Messenger"
    }

    fn parse(&self, path: &Path) -> Result<RecordStream> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|source| ChatstatsError::Utf8 {
            context: path.display().to_string(),
            source,
        })?;
        self.parse_str(&content)
    }

    fn parse_str(&self, content: &str) -> Result<RecordStream> {
        let html = Html::parse_document(content.trim_start_matches('\u{feff}'));
        self.parse_html(&html)
    }
}
