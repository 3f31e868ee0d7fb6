//! Per-renderer outcome counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::RenderError;

/// Counts render outcomes for one [`Renderer`](crate::render::Renderer).
///
/// Counters use relaxed atomics: they are reporting aids and impose no
/// ordering on the rendered output.
#[derive(Debug, Default)]
pub struct RenderStats {
    rendered: AtomicU64,
    decode_errors: AtomicU64,
    timestamp_errors: AtomicU64,
    oversized: AtomicU64,
    passed_through: AtomicU64,
}

/// Point-in-time copy of [`RenderStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Records formatted successfully.
    pub rendered: u64,
    /// Records rejected as malformed.
    pub decode_errors: u64,
    /// Records rejected for a malformed timestamp.
    pub timestamp_errors: u64,
    /// Records rejected for exceeding the size limit.
    pub oversized: u64,
    /// Undecodable lines echoed verbatim.
    pub passed_through: u64,
}

impl StatsSnapshot {
    /// Total number of records that failed to format.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.decode_errors + self.timestamp_errors + self.oversized
    }
}

impl RenderStats {
    /// Records the outcome of formatting one record.
    pub fn record<T>(&self, outcome: &Result<T, RenderError>) {
        let counter = match outcome {
            Ok(_) => &self.rendered,
            Err(RenderError::Decode(_)) => &self.decode_errors,
            Err(RenderError::Timestamp { .. }) => &self.timestamp_errors,
            Err(RenderError::TooLarge { .. }) => &self.oversized,
            Err(RenderError::Io(_)) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a line echoed without rendering.
    pub fn record_passthrough(&self) {
        self.passed_through.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rendered: self.rendered.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            timestamp_errors: self.timestamp_errors.load(Ordering::Relaxed),
            oversized: self.oversized.load(Ordering::Relaxed),
            passed_through: self.passed_through.load(Ordering::Relaxed),
        }
    }
}
