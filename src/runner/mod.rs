//! Run session - wires the executor to progress, reporting and display.
//!
//! A [`RunObserver`] receives every executor callback and fans it out to the
//! progress tracker, the report builder and a [`RunDisplay`]. The session
//! races the executor against an interrupt future; an interrupted run
//! produces no report.

mod display;

pub use display::{PlainDisplay, RunDisplay};

use std::collections::VecDeque;
use std::future::Future;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::domain::{LogEntry, RunConfig, RunSummary};
use crate::executor::{LogSink, LoopExecutor, ProgressSink};
use crate::progress::{ProgressSnapshot, ProgressTracker};
use crate::report::{Report, ReportBuilder};

/// Display tuning for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Minimum time between throttled repaints
    pub refresh: Duration,
    /// Number of recent entries kept for the activity panel
    pub activity_lines: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            refresh: Duration::from_millis(50),
            activity_lines: 10,
        }
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The run finished and its report is ready to write
    Completed(Report),
    /// The run was interrupted; no report is produced
    Interrupted { entries_recorded: usize },
}

/// Receives executor callbacks and keeps tracker, report and display in step.
pub struct RunObserver<D: RunDisplay> {
    tracker: ProgressTracker,
    builder: ReportBuilder,
    activity: VecDeque<LogEntry>,
    display: D,
    options: SessionOptions,
    last_draw: Option<Instant>,
}

impl<D: RunDisplay> RunObserver<D> {
    pub fn new(config: &RunConfig, display: D, options: SessionOptions) -> Self {
        Self {
            tracker: ProgressTracker::new(u64::from(config.outer_count())),
            builder: ReportBuilder::new(config),
            activity: VecDeque::with_capacity(options.activity_lines + 1),
            display,
            options,
            last_draw: None,
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.tracker.render()
    }

    pub fn activity(&self) -> &VecDeque<LogEntry> {
        &self.activity
    }

    pub fn entries_recorded(&self) -> usize {
        self.builder.len()
    }

    /// Repaint now, or skip if the last repaint was within the refresh interval
    pub fn repaint(&mut self, force: bool) {
        let now = Instant::now();
        let due = self
            .last_draw
            .is_none_or(|last| now.duration_since(last) >= self.options.refresh);
        if !force && !due {
            return;
        }
        self.last_draw = Some(now);
        let snapshot = self.tracker.render();
        if let Err(e) = self.display.draw(&snapshot, &self.activity) {
            warn!("Display repaint failed: {}", e);
        }
    }

    /// Final repaint and display teardown
    pub fn close(&mut self) {
        self.repaint(true);
        if let Err(e) = self.display.close() {
            warn!("Display close failed: {}", e);
        }
    }

    /// Freeze the recorded activity into a report
    pub fn finish(self, summary: RunSummary) -> Report {
        self.builder.finish(summary)
    }
}

impl<D: RunDisplay> ProgressSink for RunObserver<D> {
    fn advance_outer(&mut self) {
        self.tracker.advance_outer();
        self.repaint(true);
    }

    fn reset_inner(&mut self, total: u64) {
        self.tracker.reset_inner(total);
        self.repaint(true);
    }

    fn advance_inner(&mut self) {
        self.tracker.advance_inner();
        self.repaint(false);
    }

    fn finish_inner(&mut self) {
        self.tracker.finish_inner();
        self.repaint(false);
    }
}

impl<D: RunDisplay> LogSink for RunObserver<D> {
    fn record(&mut self, entry: LogEntry) {
        self.display.entry(&entry);
        if self.options.activity_lines > 0 {
            if self.activity.len() == self.options.activity_lines {
                self.activity.pop_front();
            }
            self.activity.push_back(entry.clone());
        }
        self.builder.record(entry);
    }
}

/// Execute one run to completion or until `interrupt` resolves.
///
/// The executor is dropped at its next suspension point when interrupted.
pub async fn run_session<D, F>(config: &RunConfig, display: D, options: SessionOptions, interrupt: F) -> RunOutcome
where
    D: RunDisplay,
    F: Future<Output = ()>,
{
    let mut executor = LoopExecutor::new(config.clone());
    let mut observer = RunObserver::new(config, display, options);
    observer.repaint(true);

    let summary = tokio::select! {
        summary = executor.run(&mut observer) => Some(summary),
        () = interrupt => None,
    };
    observer.close();

    match summary {
        Some(summary) => {
            info!(
                "Run completed: {} outer, {} middle, {} inner, {} short-circuits in {}",
                summary.outer_completed,
                summary.middle_completed,
                summary.inner_completed,
                summary.short_circuits,
                summary.elapsed_display()
            );
            RunOutcome::Completed(observer.finish(summary))
        }
        None => {
            let entries_recorded = observer.entries_recorded();
            warn!("Run interrupted after {} log entries; no report written", entries_recorded);
            RunOutcome::Interrupted { entries_recorded }
        }
    }
}
