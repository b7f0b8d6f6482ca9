//! Logger metrics for observability
//!
//! Counters describing what happened to each `log` call: written, filtered
//! out by level, skipped as empty, or reported as failed by its sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_field_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written(2);
/// metrics.record_filtered();
///
/// assert_eq!(metrics.messages_written(), 1);
/// assert_eq!(metrics.lines_written(), 2);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Calls that reached a sink
    messages_written: AtomicU64,

    /// Individual sink writes issued
    lines_written: AtomicU64,

    /// Calls dropped for an unknown level, threshold, or missing sink
    filtered_count: AtomicU64,

    /// Calls dropped because the trimmed message was empty
    skipped_empty: AtomicU64,

    /// Writes a sink reported as failed through its completion
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            messages_written: AtomicU64::new(0),
            lines_written: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            skipped_empty: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn messages_written(&self) -> u64 {
        self.messages_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn skipped_empty(&self) -> u64 {
        self.skipped_empty.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    /// Record one message emitted as `lines` sink writes
    #[inline]
    pub fn record_written(&self, lines: u64) {
        self.messages_written.fetch_add(1, Ordering::Relaxed);
        self.lines_written.fetch_add(lines, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_skipped_empty(&self) -> u64 {
        self.skipped_empty.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.messages_written.store(0, Ordering::Relaxed);
        self.lines_written.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.skipped_empty.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
