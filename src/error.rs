//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers every
//! failure in the library. Extraction errors are fatal by design of the
//! pipeline: a run either yields a complete record stream or aborts with one
//! of these.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get messages naming the block and raw fragment
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input export or a lexicon file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A required sub-region is missing from a message block.
    ///
    /// The export markup changed or the block is truncated. Fatal: the
    /// aggregates assume one record per block.
    #[error("Block {block}: missing or malformed {region} region in `{fragment}`")]
    StructuralMismatch {
        /// Zero-based index of the block in document order
        block: usize,
        /// Which region was missing ("text", "author", "timestamp", "call duration")
        region: &'static str,
        /// Truncated raw fragment of the offending block or region
        fragment: String,
    },

    /// A timestamp did not tokenize into the expected shape.
    #[error("Malformed timestamp{} '{raw}': {reason}", block_suffix(block))]
    MalformedTimestamp {
        /// Block index, once known to the assembler
        block: Option<usize>,
        /// The raw timestamp text
        raw: String,
        /// What was wrong with it
        reason: String,
    },

    /// A month name was not found in the month table.
    ///
    /// Usually means the export was produced in another locale than the
    /// loaded month table.
    #[error("Unknown month '{month}'{} (wrong month table for this export's locale?)", block_suffix(block))]
    UnknownMonth {
        /// Block index, once known to the assembler
        block: Option<usize>,
        /// The month token as it appeared in the timestamp
        month: String,
    },

    /// A configured CSS selector could not be compiled.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector text
        selector: String,
        /// Parser message
        message: String,
    },

    /// A lexicon table is malformed.
    #[error("Invalid lexicon{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Lexicon {
        /// The table file, if loaded from disk
        path: Option<PathBuf>,
        /// Description of what's wrong
        message: String,
    },

    /// An output format name or file extension wasn't recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

fn block_suffix(block: &Option<usize>) -> String {
    block.map(|b| format!(" in block {b}")).unwrap_or_default()
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

/// Longest fragment kept in error messages, in characters.
const FRAGMENT_LIMIT: usize = 120;

impl ChatstatsError {
    /// Creates a structural mismatch error, truncating the fragment.
    pub fn structural(block: usize, region: &'static str, fragment: &str) -> Self {
        ChatstatsError::StructuralMismatch {
            block,
            region,
            fragment: truncate_fragment(fragment),
        }
    }

    /// Creates a malformed timestamp error without block context.
    pub fn malformed_timestamp(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        ChatstatsError::MalformedTimestamp {
            block: None,
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown month error without block context.
    pub fn unknown_month(month: impl Into<String>) -> Self {
        ChatstatsError::UnknownMonth {
            block: None,
            month: month.into(),
        }
    }

    /// Creates a lexicon error.
    pub fn lexicon(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        ChatstatsError::Lexicon {
            path,
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Attaches a block index to timestamp errors that don't carry one yet.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn at_block(self, index: usize) -> Self {
        match self {
            ChatstatsError::MalformedTimestamp {
                block: None,
                raw,
                reason,
            } => ChatstatsError::MalformedTimestamp {
                block: Some(index),
                raw,
                reason,
            },
            ChatstatsError::UnknownMonth { block: None, month } => ChatstatsError::UnknownMonth {
                block: Some(index),
                month,
            },
            other => other,
        }
    }

    /// Returns the block index this error refers to, if any.
    pub fn block(&self) -> Option<usize> {
        match self {
            ChatstatsError::StructuralMismatch { block, .. } => Some(*block),
            ChatstatsError::MalformedTimestamp { block, .. }
            | ChatstatsError::UnknownMonth { block, .. } => *block,
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if this is a structural mismatch.
    pub fn is_structural(&self) -> bool {
        matches!(self, ChatstatsError::StructuralMismatch { .. })
    }

    /// Returns `true` if this is a malformed timestamp error.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, ChatstatsError::MalformedTimestamp { .. })
    }

    /// Returns `true` if this is an unknown month error.
    pub fn is_unknown_month(&self) -> bool {
        matches!(self, ChatstatsError::UnknownMonth { .. })
    }
}

fn truncate_fragment(fragment: &str) -> String {
    let fragment = fragment.trim();
    if fragment.chars().count() <= FRAGMENT_LIMIT {
        return fragment.to_string();
    }
    let mut out: String = fragment.chars().take(FRAGMENT_LIMIT).collect();
    out.push('…');
    out
}

// ============================================================================
// Tests
// ============================================================================
