//! Message block extraction.
//!
//! The export repeats one container element per message. Inside it sit the
//! author, the message body, the send time and, for calls, a duration span.
//! Which elements those are depends on the export version and is described by
//! an [`ExportLayout`].

use scraper::{ElementRef, Html, Selector};

use crate::config::ExportLayout;
use crate::error::{ChatstatsError, Result};
use crate::parsing::duration::CallDuration;

/// Literal div artifacts that can show up in message text.
const DIV_ARTIFACTS: &[&str] = &["<div>", "</div>"];

/// Compiled selectors for one [`ExportLayout`].
///
/// # Example
///
/// ```rust
/// use chatstats::config::ExportLayout;
/// use chatstats::parsing::BlockExtractor;
/// use scraper::Html;
///
/// let extractor = BlockExtractor::new(&ExportLayout::default())?;
/// let html = Html::parse_document("<html><body><p>no messages</p></body></html>");
/// assert_eq!(extractor.blocks(&html).count(), 0);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    block: Selector,
    author: Selector,
    text: Selector,
    timestamp: Selector,
    call_duration: Selector,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ChatstatsError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl BlockExtractor {
    /// Compiles the selectors of `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidSelector`] for the first selector
    /// that does not parse.
    pub fn new(layout: &ExportLayout) -> Result<Self> {
        Ok(Self {
            block: compile(&layout.block)?,
            author: compile(&layout.author)?,
            text: compile(&layout.text)?,
            timestamp: compile(&layout.timestamp)?,
            call_duration: compile(&layout.call_duration)?,
        })
    }

    /// Iterates the message blocks of `html` in document order.
    pub fn blocks<'a>(&'a self, html: &'a Html) -> impl Iterator<Item = Block<'a>> + 'a {
        html.select(&self.block)
            .enumerate()
            .map(move |(index, element)| Block {
                index,
                element,
                extractor: self,
            })
    }

    /// Counts the message blocks of `html`.
    pub fn count(&self, html: &Html) -> usize {
        html.select(&self.block).count()
    }
}

/// Handle to one message block.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    index: usize,
    element: ElementRef<'a>,
    extractor: &'a BlockExtractor,
}

/// Raw region texts of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    /// Zero-based block index in document order.
    pub index: usize,
    /// Message body, markup not yet sanitized.
    pub text: String,
    /// Trimmed author name.
    pub author: String,
    /// Timestamp text, not yet normalized.
    pub timestamp: String,
    /// Parsed call duration, if the block is a call.
    pub call_duration: Option<CallDuration>,
}

impl<'a> Block<'a> {
    /// Zero-based block index in document order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The block's container element.
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// Pulls the region texts out of the block.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::StructuralMismatch`] when the text, author or
    /// timestamp region is missing, or when a call-duration region has no
    /// number in it.
    pub fn extract(&self) -> Result<RawBlock> {
        let mut text = self.region_text(&self.extractor.text, "text")?;
        for artifact in DIV_ARTIFACTS {
            text = text.replace(artifact, "");
        }

        let author = self.region_text(&self.extractor.author, "author")?.trim().to_string();
        let timestamp = self.region_text(&self.extractor.timestamp, "timestamp")?;

        let call_duration = match self.element.select(&self.extractor.call_duration).next() {
            Some(span) => {
                let raw: String = span.text().collect();
                let parsed = CallDuration::parse(&raw).ok_or_else(|| {
                    ChatstatsError::structural(self.index, "call duration", &span.html())
                })?;
                Some(parsed)
            }
            None => None,
        };

        tracing::trace!(block = self.index, author = %author, "extracted block");

        Ok(RawBlock {
            index: self.index,
            text,
            author,
            timestamp,
            call_duration,
        })
    }

    fn region_text(&self, selector: &Selector, region: &'static str) -> Result<String> {
        self.element
            .select(selector)
            .next()
            .map(|el| el.text().collect())
            .ok_or_else(|| ChatstatsError::structural(self.index, region, &self.element.html()))
    }
}
