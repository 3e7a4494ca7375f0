//! TaskFlow - a nested-loop task simulator
//!
//! TaskFlow runs outer, middle and inner loops of simulated work with a
//! probabilistic early exit from the inner loop, shows live progress, writes
//! a markdown activity report and provides a terminal viewer for it.

pub mod domain;
pub mod error;
pub mod executor;
pub mod progress;
pub mod report;
pub mod runner;
pub mod splash;
pub mod tui;
pub mod viewer;

pub use error::{Result, TaskflowError};
