//! Progress tracking for the two run indicators.
//!
//! The outer indicator counts outer iterations. The inner indicator counts
//! middle and inner iterations combined and restarts with every outer
//! iteration. Positions are clamped to `[0, total]`.

use std::time::{Duration, Instant};

use crate::executor::ProgressSink;

/// One position/total counter with its own elapsed clock.
#[derive(Debug, Clone)]
struct Indicator {
    position: u64,
    total: u64,
    started: Instant,
}

impl Indicator {
    fn new(total: u64) -> Self {
        Self {
            position: 0,
            total,
            started: Instant::now(),
        }
    }

    fn advance(&mut self) {
        if self.position < self.total {
            self.position += 1;
        }
    }

    fn reset(&mut self, total: u64) {
        self.position = 0;
        self.total = total;
        self.started = Instant::now();
    }

    fn view(&self, now: Instant) -> IndicatorView {
        IndicatorView {
            position: self.position,
            total: self.total,
            elapsed: now.saturating_duration_since(self.started),
        }
    }
}

/// Immutable view of one indicator at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorView {
    pub position: u64,
    pub total: u64,
    pub elapsed: Duration,
}

impl IndicatorView {
    /// Completion ratio in `[0.0, 1.0]`; an empty indicator counts as done
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.position as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.total
    }

    /// `position/total`
    pub fn count_label(&self) -> String {
        format!("{}/{}", self.position, self.total)
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn elapsed_label(&self) -> String {
        format_hms(self.elapsed)
    }
}

/// Rendered state of both indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub outer: IndicatorView,
    pub inner: IndicatorView,
}

/// Owns the outer and combined middle+inner indicators.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    outer: Indicator,
    inner: Indicator,
}

impl ProgressTracker {
    /// Create a tracker for a run with `outer_total` outer iterations
    pub fn new(outer_total: u64) -> Self {
        Self {
            outer: Indicator::new(outer_total),
            inner: Indicator::new(0),
        }
    }

    pub fn advance_outer(&mut self) {
        self.outer.advance();
    }

    /// Start a fresh inner epoch at 0 of `total`
    pub fn reset_inner(&mut self, total: u64) {
        self.inner.reset(total);
    }

    pub fn advance_inner(&mut self) {
        self.inner.advance();
    }

    /// Shrink the inner total to the work actually done, marking it complete.
    ///
    /// Short-circuits leave the upper bound unreached; this shows the epoch as finished.
    pub fn finish_inner(&mut self) {
        self.inner.total = self.inner.position;
    }

    /// Current visual state of both indicators
    pub fn render(&self) -> ProgressSnapshot {
        let now = Instant::now();
        ProgressSnapshot {
            outer: self.outer.view(now),
            inner: self.inner.view(now),
        }
    }
}

impl ProgressSink for ProgressTracker {
    fn advance_outer(&mut self) {
        ProgressTracker::advance_outer(self);
    }

    fn reset_inner(&mut self, total: u64) {
        ProgressTracker::reset_inner(self, total);
    }

    fn advance_inner(&mut self) {
        ProgressTracker::advance_inner(self);
    }

    fn finish_inner(&mut self) {
        ProgressTracker::finish_inner(self);
    }
}

/// Format a duration as `HH:MM:SS`
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
