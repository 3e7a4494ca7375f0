//! Parser for the markdown report layout.
//!
//! Reads back exactly what [`super::markdown`] writes. Unknown sections and
//! table rows are ignored; missing required fields are parse errors.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::markdown::*;
use super::{Report, ReportParameters};
use crate::domain::{LogEntry, LogLevel, RunSummary};
use crate::error::{Result, TaskflowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Parameters,
    Summary,
    Log,
    Other,
}

fn parse_error(msg: impl Into<String>) -> TaskflowError {
    TaskflowError::Parse(msg.into())
}

/// Split a `| key | value |` row into its two cells
fn table_cells(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    let (key, value) = inner.split_once('|')?;
    let (key, value) = (key.trim(), value.trim());
    if key.starts_with("---") || key.starts_with(":--") {
        return None;
    }
    Some((key, value))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| parse_error(format!("invalid timestamp {:?}: {}", raw, e)))
}

/// Parse `- `ts` **LEVEL** message`
fn parse_entry(line: &str) -> Result<LogEntry> {
    let bad = || parse_error(format!("malformed log entry: {}", line));

    let rest = line.strip_prefix("- `").ok_or_else(bad)?;
    let (ts, rest) = rest.split_once("` **").ok_or_else(bad)?;
    let (level, message) = rest.split_once("**").ok_or_else(bad)?;
    let message = message.strip_prefix(' ').unwrap_or(message);

    Ok(LogEntry::at(parse_timestamp(ts)?, level.parse::<LogLevel>()?, message))
}

/// Parse `4.321 s` into a millisecond-precision duration
fn parse_elapsed(raw: &str) -> Result<Duration> {
    let bad = || parse_error(format!("invalid elapsed time: {}", raw));
    let number = raw.strip_suffix(" s").ok_or_else(bad)?;
    let (secs, millis) = number.split_once('.').ok_or_else(bad)?;
    if millis.len() != 3 {
        return Err(bad());
    }
    let secs: u64 = secs.parse().map_err(|_| bad())?;
    let millis: u64 = millis.parse().map_err(|_| bad())?;
    Ok(Duration::from_millis(secs * 1000 + millis))
}

struct Fields<'a> {
    section: &'static str,
    map: HashMap<&'a str, &'a str>,
}

impl<'a> Fields<'a> {
    fn raw(&self, key: &str) -> Result<&'a str> {
        self.map
            .get(key)
            .copied()
            .ok_or_else(|| parse_error(format!("missing {} field: {}", self.section, key)))
    }

    fn get<T: std::str::FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.raw(key)?;
        raw.parse()
            .map_err(|_| parse_error(format!("invalid {} field {}: {}", self.section, key, raw)))
    }

    fn optional<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
        if self.map.contains_key(key) {
            self.get(key).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Parse a full report from markdown.
pub fn parse_report(markdown: &str) -> Result<Report> {
    let mut lines = markdown.lines().skip_while(|l| l.trim().is_empty());
    match lines.next() {
        Some(first) if first.trim_end() == REPORT_TITLE => {}
        _ => return Err(parse_error("not a taskflow report (missing title)")),
    }

    let mut section = Section::Preamble;
    let mut generated_at = None;
    let mut params = Fields {
        section: "parameter",
        map: HashMap::new(),
    };
    let mut summary = Fields {
        section: "summary",
        map: HashMap::new(),
    };
    let mut saw_log = false;
    let mut entries = Vec::new();

    for raw in lines {
        let line = raw.trim_end();
        if line.starts_with("## ") {
            section = match line {
                PARAMETERS_HEADING => Section::Parameters,
                SUMMARY_HEADING => Section::Summary,
                LOG_HEADING => {
                    saw_log = true;
                    Section::Log
                }
                _ => Section::Other,
            };
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match section {
            Section::Preamble => {
                if let Some(ts) = line.strip_prefix(GENERATED_PREFIX) {
                    generated_at = Some(parse_timestamp(ts.trim())?);
                }
            }
            Section::Parameters => {
                if let Some((k, v)) = table_cells(line) {
                    params.map.insert(k, v);
                }
            }
            Section::Summary => {
                if let Some((k, v)) = table_cells(line) {
                    summary.map.insert(k, v);
                }
            }
            // Messages may end in whitespace; only a CRLF terminator is dropped
            Section::Log => entries.push(parse_entry(raw.trim_end_matches('\r'))?),
            Section::Other => {}
        }
    }

    let generated_at = generated_at.ok_or_else(|| parse_error("missing generation timestamp"))?;
    if !saw_log {
        return Err(parse_error("missing activity log section"));
    }

    let parameters = ReportParameters {
        outer_count: params.get(PARAM_OUTER)?,
        middle_count: params.get(PARAM_MIDDLE)?,
        inner_max: params.get(PARAM_INNER)?,
        short_circuit_prob: params.get(PARAM_PROBABILITY)?,
        seed: params.optional(PARAM_SEED)?,
    };

    let summary = RunSummary {
        outer_completed: summary.get(SUMMARY_OUTER)?,
        middle_completed: summary.get(SUMMARY_MIDDLE)?,
        inner_completed: summary.get(SUMMARY_INNER)?,
        short_circuits: summary.get(SUMMARY_SHORT_CIRCUITS)?,
        elapsed: parse_elapsed(summary.raw(SUMMARY_ELAPSED)?)?,
    };

    Ok(Report {
        generated_at,
        parameters,
        summary,
        entries,
    })
}
