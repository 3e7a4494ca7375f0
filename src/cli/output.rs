//! Colored terminal text for the run command.

use colored::*;
use std::fmt::Write as _;
use std::path::Path;

use taskflow::domain::{RunConfig, RunSummary};

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<28} {}", format!("{}:", label).bold(), value);
}

/// Parameter block printed before the run starts
pub fn configuration_text(config: &RunConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Configuration".cyan().bold());
    row(&mut out, "Outer iterations", config.outer_count());
    row(&mut out, "Middle iterations", config.middle_count());
    row(&mut out, "Inner iterations (max)", config.inner_max());
    row(&mut out, "Short-circuit probability", config.short_circuit_prob());
    row(&mut out, "Report", config.report_path().display());
    if let Some(seed) = config.seed() {
        row(&mut out, "Seed", seed);
    }
    out
}

/// Summary block printed after a completed run
pub fn summary_text(summary: &RunSummary, report_path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Run complete".green().bold());
    row(&mut out, "Outer iterations completed", summary.outer_completed);
    row(&mut out, "Middle iterations completed", summary.middle_completed);
    row(&mut out, "Inner iterations completed", summary.inner_completed);
    row(&mut out, "Short-circuit events", summary.short_circuits.to_string().yellow());
    row(&mut out, "Avg inner per middle", format!("{:.2}", summary.inner_per_middle()));
    row(&mut out, "Elapsed time", summary.elapsed_display().cyan());
    let _ = writeln!(out, "{} {}", "Report written to".green(), report_path.display());
    out
}

/// Notice printed when the run is interrupted
pub fn interrupted_text(entries_recorded: usize) -> String {
    format!(
        "{} after {} log entries; no report written",
        "Run cancelled".yellow().bold(),
        entries_recorded
    )
}
