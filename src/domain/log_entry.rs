//! Activity log entries recorded during a run.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::TaskflowError;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

impl LogLevel {
    /// Tag written in front of each entry in the report
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LogLevel {
    type Err = TaskflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            other => Err(TaskflowError::Parse(format!("unknown log level: {}", other))),
        }
    }
}

/// A single line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    ///
    /// Timestamps keep millisecond precision so they survive the report format.
    /// Newlines in the message are folded into spaces.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(Utc::now().trunc_subsecs(3), level, message)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, level: LogLevel, message: impl Into<String>) -> Self {
        let message: String = message.into();
        let message = if message.contains(['\n', '\r']) {
            message.replace(['\n', '\r'], " ")
        } else {
            message
        };
        Self {
            timestamp,
            level,
            message,
        }
    }

    /// Create an info-level entry
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Create a warn-level entry
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    /// Timestamp as written in the report
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_level_tags() {
        assert_eq!(LogLevel::Info.tag(), "INFO");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("DEBUG".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_constructors() {
        let info = LogEntry::info("Outer iteration 1/5 complete");
        assert_eq!(info.level, LogLevel::Info);
        assert_eq!(info.message, "Outer iteration 1/5 complete");

        let warn = LogEntry::warn("Short-circuit");
        assert_eq!(warn.level, LogLevel::Warn);
    }

    #[test]
    fn test_newlines_folded() {
        let entry = LogEntry::info("line one\nline two\r\nthree");
        assert_eq!(entry.message, "line one line two  three");
    }

    #[test]
    fn test_timestamp_millisecond_precision() {
        let entry = LogEntry::info("tick");
        assert_eq!(entry.timestamp, entry.timestamp.trunc_subsecs(3));
    }

    #[test]
    fn test_timestamp_string() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 5).unwrap();
        let entry = LogEntry::at(ts, LogLevel::Info, "x");
        assert_eq!(entry.timestamp_string(), "2026-10-19T08:30:05.000Z");
    }
}
