//! Run reports.
//!
//! A [`ReportBuilder`] collects log entries while the run executes and is
//! frozen into a [`Report`] once the summary is known. Reports are written as
//! markdown and can be parsed back from that markdown.

mod builder;
mod markdown;
mod parser;

pub use builder::ReportBuilder;
pub use markdown::{REPORT_TITLE, write_report};
pub use parser::parse_report;

use chrono::{DateTime, Utc};

use crate::domain::{LogEntry, RunConfig, RunSummary};

/// The run parameters echoed into the report header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParameters {
    pub outer_count: u32,
    pub middle_count: u32,
    pub inner_max: u32,
    pub short_circuit_prob: f64,
    pub seed: Option<u64>,
}

impl From<&RunConfig> for ReportParameters {
    fn from(config: &RunConfig) -> Self {
        Self {
            outer_count: config.outer_count(),
            middle_count: config.middle_count(),
            inner_max: config.inner_max(),
            short_circuit_prob: config.short_circuit_prob(),
            seed: config.seed(),
        }
    }
}

/// A finished run report. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub parameters: ReportParameters,
    pub summary: RunSummary,
    pub entries: Vec<LogEntry>,
}

impl Report {
    /// Serialize to the markdown report layout
    pub fn to_markdown(&self) -> String {
        markdown::render(self)
    }

    /// Parse a report from its markdown layout
    pub fn parse(markdown: &str) -> crate::error::Result<Self> {
        parse_report(markdown)
    }
}
