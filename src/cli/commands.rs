//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: execute the nested-loop simulation and write a report
//! - view: browse a previously written report

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TaskFlow - nested-loop task simulator with live progress and markdown reports
#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the simulation and write a markdown report
    Run(RunArgs),

    /// Open a report in the interactive viewer
    View {
        /// Path of the report to view
        report_path: PathBuf,
    },
}

/// Options for `taskflow run`. Unset values fall back to the config file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Number of outer iterations (0-1000)
    #[arg(short, long)]
    pub outer: Option<u32>,

    /// Middle iterations per outer iteration (0-10)
    #[arg(short, long)]
    pub middle: Option<u32>,

    /// Maximum inner iterations per middle iteration (1-20)
    #[arg(short, long)]
    pub inner: Option<u32>,

    /// Probability of short-circuiting before each inner iteration (0.0-1.0)
    #[arg(short = 's', long = "short-circuit")]
    pub short_circuit: Option<f64>,

    /// Markdown report output path
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Skip the splash screen
    #[arg(long)]
    pub no_splash: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Open the report viewer when the run completes
    #[arg(long)]
    pub view: bool,
}
