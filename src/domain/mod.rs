//! Domain types for TaskFlow
//!
//! This module contains the core data model of a simulated run:
//! - RunConfig: validated, immutable run parameters
//! - LogEntry: one line of the activity log
//! - RunSummary: counts and elapsed time computed at run end

pub mod log_entry;
pub mod run_config;
pub mod summary;

pub use log_entry::{LogEntry, LogLevel};
pub use run_config::{INNER_RANGE, MIDDLE_RANGE, OUTER_RANGE, RunConfig, RunParams, WorkDelay};
pub use summary::RunSummary;
