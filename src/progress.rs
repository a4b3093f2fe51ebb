//! Progress reporting for a parse run.
//!
//! The parser pushes a [`Progress`] value to an optional callback after every
//! message block. The estimated time left is the mean time per block so far
//! multiplied by the number of blocks still to go.
//!
//! # Example
//!
//! ```rust
//! use chatstats::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     if let Some(pct) = progress.percentage() {
//!         println!("Progress: {:.1}%", pct);
//!     }
//! });
//!
//! callback(Progress::new(5, 10));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Progress of one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    /// Number of message blocks processed so far.
    pub items_processed: usize,

    /// Total number of message blocks in the document.
    pub total_items: usize,

    /// Wall time since the run started.
    pub elapsed: Duration,

    /// Estimated time left, once at least one block has been timed.
    pub eta: Option<Duration>,
}

impl Progress {
    /// Creates a progress value without timing information.
    pub fn new(items_processed: usize, total_items: usize) -> Self {
        Self {
            items_processed,
            total_items,
            ..Self::default()
        }
    }

    /// Sets the elapsed time.
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Sets the estimated time left.
    #[must_use]
    pub fn with_eta(mut self, eta: Duration) -> Self {
        self.eta = Some(eta);
        self
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// An empty document counts as complete.
    ///
    /// ```rust
    /// use chatstats::progress::Progress;
    ///
    /// assert_eq!(Progress::new(50, 200).percentage(), Some(25.0));
    /// assert_eq!(Progress::new(0, 0).percentage(), Some(100.0));
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        if self.total_items == 0 {
            Some(100.0)
        } else {
            Some(self.items_processed as f64 / self.total_items as f64 * 100.0)
        }
    }

    /// Returns whether every block has been processed.
    pub fn is_complete(&self) -> bool {
        self.items_processed >= self.total_items
    }

    /// Returns the number of blocks left.
    pub fn remaining_items(&self) -> usize {
        self.total_items.saturating_sub(self.items_processed)
    }
}

/// Timing state behind the [`Progress`] values of one run.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    done: usize,
    busy: Duration,
    started: Instant,
}

impl ProgressTracker {
    /// Starts tracking a run over `total` blocks.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            busy: Duration::ZERO,
            started: Instant::now(),
        }
    }

    /// Records one finished block that took `block_time`.
    pub fn tick(&mut self, block_time: Duration) -> Progress {
        self.done += 1;
        self.busy += block_time;

        let remaining = self.total.saturating_sub(self.done);
        let mean = self.busy / u32::try_from(self.done).unwrap_or(u32::MAX);
        let eta = mean.saturating_mul(u32::try_from(remaining).unwrap_or(u32::MAX));

        Progress::new(self.done, self.total)
            .with_elapsed(self.started.elapsed())
            .with_eta(eta)
    }

    /// Current progress without recording a block.
    pub fn snapshot(&self) -> Progress {
        Progress::new(self.done, self.total).with_elapsed(self.started.elapsed())
    }
}

/// Callback type for receiving progress updates.
///
/// ```rust
/// use chatstats::progress::{Progress, ProgressCallback};
/// use std::sync::Arc;
///
/// let callback: ProgressCallback = Arc::new(|progress| {
///     println!("{} blocks done", progress.items_processed);
/// });
///
/// callback(Progress::new(10, 20));
/// ```
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints to stderr.
///
/// Prints roughly once per percent, plus the final block.
///
/// ```rust
/// use chatstats::progress::{Progress, stderr_progress};
///
/// let callback = stderr_progress();
/// // Prints "10 out of 10 messages done - ETA 0 seconds"
/// callback(Progress::new(10, 10));
/// ```
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        let step = (progress.total_items / 100).max(1);
        if progress.items_processed % step == 0 || progress.is_complete() {
            let eta = progress.eta.unwrap_or_default();
            eprintln!(
                "{} out of {} messages done - ETA {} seconds",
                progress.items_processed,
                progress.total_items,
                eta.as_secs()
            );
        }
    })
}
