//! CLI module for taskflow - command-line interface and terminal output.
//!
//! Provides the main entry point with the `run` and `view` subcommands.

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, RunArgs};
