//! Narrow capability interfaces the executor reports through.
//!
//! The executor never talks to a concrete UI or report type. Anything that
//! wants to observe a run implements these two traits.

use crate::domain::LogEntry;

/// Receives progress updates for the two tracked indicators.
pub trait ProgressSink {
    /// One outer iteration finished
    fn advance_outer(&mut self);

    /// A new outer iteration begins; the combined indicator restarts at 0 of `total`
    fn reset_inner(&mut self, total: u64);

    /// One middle or inner iteration finished
    fn advance_inner(&mut self);

    /// The middle/inner work of the current outer iteration is done
    fn finish_inner(&mut self) {}
}

/// Receives activity log entries in execution order.
pub trait LogSink {
    fn record(&mut self, entry: LogEntry);
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn advance_outer(&mut self) {
        (**self).advance_outer();
    }

    fn reset_inner(&mut self, total: u64) {
        (**self).reset_inner(total);
    }

    fn advance_inner(&mut self) {
        (**self).advance_inner();
    }

    fn finish_inner(&mut self) {
        (**self).finish_inner();
    }
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn record(&mut self, entry: LogEntry) {
        (**self).record(entry);
    }
}

impl LogSink for Vec<LogEntry> {
    fn record(&mut self, entry: LogEntry) {
        self.push(entry);
    }
}
