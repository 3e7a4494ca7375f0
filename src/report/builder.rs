//! Report builder - accumulates the activity log during a run.

use chrono::{SubsecRound, Utc};

use super::{Report, ReportParameters};
use crate::domain::{LogEntry, RunConfig, RunSummary};
use crate::executor::LogSink;

/// Collects log entries in execution order until the run finishes.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    parameters: ReportParameters,
    entries: Vec<LogEntry>,
}

impl ReportBuilder {
    /// Create a builder for a run with the given configuration
    pub fn new(config: &RunConfig) -> Self {
        Self {
            parameters: ReportParameters::from(config),
            entries: Vec::new(),
        }
    }

    /// Append an entry. Entries are kept in insertion order.
    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the collected entries together with the final summary
    pub fn finish(self, summary: RunSummary) -> Report {
        Report {
            generated_at: Utc::now().trunc_subsecs(3),
            parameters: self.parameters,
            summary,
            entries: self.entries,
        }
    }
}

impl LogSink for ReportBuilder {
    fn record(&mut self, entry: LogEntry) {
        ReportBuilder::record(self, entry);
    }
}
