//! Run displays - where progress and activity go while a run executes.

use std::collections::VecDeque;
use std::io::Write;

use colored::*;

use crate::domain::{LogEntry, LogLevel};
use crate::error::Result;
use crate::progress::ProgressSnapshot;

/// Presentation surface for a running simulation.
pub trait RunDisplay {
    /// Called for every log entry as it is recorded
    fn entry(&mut self, _entry: &LogEntry) {}

    /// Repaint with the latest progress and the most recent activity
    fn draw(&mut self, snapshot: &ProgressSnapshot, activity: &VecDeque<LogEntry>) -> Result<()>;

    /// Tear down; the display is not drawn again afterwards
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Line-oriented display for non-interactive output (pipes, CI logs).
///
/// Prints every log entry and a progress line whenever an outer iteration finishes.
pub struct PlainDisplay<W: Write> {
    out: W,
    last_outer: Option<u64>,
}

impl<W: Write> PlainDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, last_outer: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RunDisplay for PlainDisplay<W> {
    fn entry(&mut self, entry: &LogEntry) {
        let level = match entry.level {
            LogLevel::Info => entry.level.tag().green(),
            LogLevel::Warn => entry.level.tag().yellow(),
        };
        // Write failures surface again on the next draw
        let _ = writeln!(self.out, "{} {} {}", entry.timestamp_string().dimmed(), level, entry.message);
    }

    fn draw(&mut self, snapshot: &ProgressSnapshot, _activity: &VecDeque<LogEntry>) -> Result<()> {
        if self.last_outer == Some(snapshot.outer.position) {
            return Ok(());
        }
        self.last_outer = Some(snapshot.outer.position);
        writeln!(
            self.out,
            "{} {} ({:.1}%) {}",
            "Outer Loop".bold().blue(),
            snapshot.outer.count_label(),
            snapshot.outer.ratio() * 100.0,
            snapshot.outer.elapsed_label().cyan()
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
