//! Nested loop execution.
//!
//! The executor drives the simulated workload and reports through the
//! [`ProgressSink`] and [`LogSink`] capabilities.

mod loop_executor;
mod sink;

pub use loop_executor::LoopExecutor;
pub use sink::{LogSink, ProgressSink};
