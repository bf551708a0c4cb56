//! Engine metrics for observability
//!
//! Counters shared between the public logging surface and the dispatcher
//! thread, useful for detecting suppression and verifying drain behavior.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for engine observability
///
/// # Example
///
/// ```
/// use fanlog::EngineMetrics;
///
/// let metrics = EngineMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_dispatched();
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.dispatched(), 1);
/// ```
#[derive(Debug)]
pub struct EngineMetrics {
    /// Records accepted into the ingestion queue
    enqueued: AtomicU64,

    /// Records handed to the sink fan-out by the dispatcher
    dispatched: AtomicU64,

    /// Debug records dropped before enqueue (debug mode disabled)
    debug_suppressed: AtomicU64,

    /// Records skipped by the dispatcher for having an empty message
    empty_skipped: AtomicU64,
}

impl EngineMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            debug_suppressed: AtomicU64::new(0),
            empty_skipped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn debug_suppressed(&self) -> u64 {
        self.debug_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn empty_skipped(&self) -> u64 {
        self.empty_skipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_debug_suppressed(&self) -> u64 {
        self.debug_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_empty_skipped(&self) -> u64 {
        self.empty_skipped.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}
