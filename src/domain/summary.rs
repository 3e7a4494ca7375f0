//! Run summary statistics.

use std::time::Duration;

/// Counts collected over one run. Computed once when the run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outer_completed: u64,
    pub middle_completed: u64,
    pub inner_completed: u64,
    pub short_circuits: u64,
    /// Wall time of the run, millisecond precision
    pub elapsed: Duration,
}

impl RunSummary {
    /// Elapsed time formatted as seconds with millisecond digits, e.g. `4.321 s`
    pub fn elapsed_display(&self) -> String {
        let ms = self.elapsed.as_millis();
        format!("{}.{:03} s", ms / 1000, ms % 1000)
    }

    /// Average inner iterations per middle iteration
    pub fn inner_per_middle(&self) -> f64 {
        if self.middle_completed == 0 {
            0.0
        } else {
            self.inner_completed as f64 / self.middle_completed as f64
        }
    }
}

/// Truncate a duration to whole milliseconds
pub fn truncate_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis() as u64)
}
