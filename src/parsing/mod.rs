//! Per-block parsing stages.
//!
//! Each stage is a pure function over one block's data; the
//! [`MessengerParser`](crate::parser::MessengerParser) chains them:
//!
//! - [`blocks`] - locate message blocks and pull out their regions
//! - [`sanitize`] - strip markup, repair characters, convert ascii smileys
//! - [`timestamp`] - localized send time to [`CanonicalTimestamp`](crate::CanonicalTimestamp)
//! - [`duration`] - call length label to minutes

pub mod blocks;
pub mod duration;
pub mod sanitize;
pub mod timestamp;

pub use blocks::{Block, BlockExtractor, RawBlock};
pub use duration::CallDuration;
pub use sanitize::{Sanitized, sanitize, strip_markup};
pub use timestamp::{RawTimestamp, normalize_timestamp};
