//! Error types for TaskFlow
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// All error types that can occur in TaskFlow
#[derive(Debug, Error)]
pub enum TaskflowError {
    /// A run parameter is outside its declared range
    #[error("Invalid {field} value {value}: must be {expected}")]
    Config {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// The report file could not be written or read
    #[error("Report file {}: {source}", path.display())]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not in the taskflow report layout
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskflowError {
    /// Build a config error for a field with its valid range
    pub fn config(field: &'static str, value: impl ToString, expected: impl Into<String>) -> Self {
        Self::Config {
            field,
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Wrap an IO failure on the report file
    pub fn report_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReportIo {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type alias for TaskFlow operations
pub type Result<T> = std::result::Result<T, TaskflowError>;
