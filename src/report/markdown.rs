//! Markdown serialization of reports.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::SecondsFormat;
use log::info;

use super::Report;
use crate::error::{Result, TaskflowError};

pub const REPORT_TITLE: &str = "# TaskFlow Report";

pub(super) const GENERATED_PREFIX: &str = "Generated: ";
pub(super) const PARAMETERS_HEADING: &str = "## Parameters";
pub(super) const SUMMARY_HEADING: &str = "## Summary";
pub(super) const LOG_HEADING: &str = "## Activity Log";

pub(super) const PARAM_OUTER: &str = "Outer iterations";
pub(super) const PARAM_MIDDLE: &str = "Middle iterations";
pub(super) const PARAM_INNER: &str = "Inner iterations (max)";
pub(super) const PARAM_PROBABILITY: &str = "Short-circuit probability";
pub(super) const PARAM_SEED: &str = "Seed";

pub(super) const SUMMARY_OUTER: &str = "Outer iterations completed";
pub(super) const SUMMARY_MIDDLE: &str = "Middle iterations completed";
pub(super) const SUMMARY_INNER: &str = "Inner iterations completed";
pub(super) const SUMMARY_SHORT_CIRCUITS: &str = "Short-circuit events";
pub(super) const SUMMARY_ELAPSED: &str = "Elapsed time";

fn table_row(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "| {} | {} |", key, value);
}

/// Render a report into its markdown layout.
pub(super) fn render(report: &Report) -> String {
    let mut out = String::with_capacity(256 + report.entries.len() * 80);
    let params = &report.parameters;
    let summary = &report.summary;

    let _ = writeln!(out, "{}", REPORT_TITLE);
    out.push('\n');
    let _ = writeln!(
        out,
        "{}{}",
        GENERATED_PREFIX,
        report.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    out.push('\n');

    let _ = writeln!(out, "{}", PARAMETERS_HEADING);
    out.push('\n');
    out.push_str("| Parameter | Value |\n|---|---|\n");
    table_row(&mut out, PARAM_OUTER, params.outer_count);
    table_row(&mut out, PARAM_MIDDLE, params.middle_count);
    table_row(&mut out, PARAM_INNER, params.inner_max);
    table_row(&mut out, PARAM_PROBABILITY, params.short_circuit_prob);
    if let Some(seed) = params.seed {
        table_row(&mut out, PARAM_SEED, seed);
    }
    out.push('\n');

    let _ = writeln!(out, "{}", SUMMARY_HEADING);
    out.push('\n');
    out.push_str("| Metric | Value |\n|---|---|\n");
    table_row(&mut out, SUMMARY_OUTER, summary.outer_completed);
    table_row(&mut out, SUMMARY_MIDDLE, summary.middle_completed);
    table_row(&mut out, SUMMARY_INNER, summary.inner_completed);
    table_row(&mut out, SUMMARY_SHORT_CIRCUITS, summary.short_circuits);
    table_row(&mut out, SUMMARY_ELAPSED, summary.elapsed_display());
    out.push('\n');

    let _ = writeln!(out, "{}", LOG_HEADING);
    out.push('\n');
    for entry in &report.entries {
        let _ = writeln!(
            out,
            "- `{}` **{}** {}",
            entry.timestamp_string(),
            entry.level.tag(),
            entry.message
        );
    }

    out
}

/// Write a report to `path`, replacing any previous report there.
///
/// Missing parent directories are created.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TaskflowError::report_io(path, e))?;
    }
    fs::write(path, report.to_markdown()).map_err(|e| TaskflowError::report_io(path, e))?;
    info!("Wrote report with {} entries to {}", report.entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogEntry, LogLevel, RunSummary};
    use crate::report::ReportParameters;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample() -> Report {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        Report {
            generated_at: ts,
            parameters: ReportParameters {
                outer_count: 2,
                middle_count: 1,
                inner_max: 3,
                short_circuit_prob: 0.25,
                seed: None,
            },
            summary: RunSummary {
                outer_completed: 2,
                middle_completed: 2,
                inner_completed: 6,
                short_circuits: 0,
                elapsed: Duration::from_millis(812),
            },
            entries: vec![
                LogEntry::at(ts, LogLevel::Info, "Run started"),
                LogEntry::at(ts, LogLevel::Warn, "Short-circuit before inner iteration 1/3"),
            ],
        }
    }

    #[test]
    fn test_render_layout() {
        let md = sample().to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "# TaskFlow Report");
        assert!(md.contains("Generated: 2026-10-19T09:00:00.000Z"));
        assert!(md.contains("| Outer iterations | 2 |"));
        assert!(md.contains("| Short-circuit probability | 0.25 |"));
        assert!(md.contains("| Inner iterations completed | 6 |"));
        assert!(md.contains("| Elapsed time | 0.812 s |"));
        assert!(!md.contains("| Seed |"));
        assert_eq!(lines.last().copied(), Some("- `2026-10-19T09:00:00.000Z` **WARN** Short-circuit before inner iteration 1/3"));
    }

    #[test]
    fn test_render_includes_seed() {
        let mut report = sample();
        report.parameters.seed = Some(42);
        assert!(report.to_markdown().contains("| Seed | 42 |"));
    }

    #[test]
    fn test_write_report_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/report.md");
        write_report(&sample(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(REPORT_TITLE));
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");
        std::fs::write(&path, "old contents").unwrap();
        write_report(&sample(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("old contents"));
    }

    #[test]
    fn test_write_report_unwritable_path() {
        let dir = TempDir::new().unwrap();
        // A regular file cannot act as a parent directory
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("report.md");

        let err = write_report(&sample(), &path).unwrap_err();
        match err {
            TaskflowError::ReportIo { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ReportIo, got {:?}", other),
        }
    }
}
