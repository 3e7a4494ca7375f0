//! Loop executor - runs the nested outer/middle/inner simulation.
//!
//! Each iteration performs one simulated unit of work (a bounded delay),
//! then reports one log entry and one progress step. The inner loop draws a
//! fresh random value before every step and stops early when the draw falls
//! below the short-circuit probability.

use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::sink::{LogSink, ProgressSink};
use crate::domain::summary::truncate_to_millis;
use crate::domain::{LogEntry, RunConfig, RunSummary};

/// Runs the simulated workload described by a [`RunConfig`].
pub struct LoopExecutor<R = StdRng> {
    config: RunConfig,
    rng: R,
}

impl LoopExecutor<StdRng> {
    /// Create an executor, seeding the RNG from the config or the OS.
    pub fn new(config: RunConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }
}

impl<R: Rng> LoopExecutor<R> {
    /// Create an executor with a caller-supplied RNG
    pub fn with_rng(config: RunConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run every iteration to completion and return the summary.
    ///
    /// Suspends at each unit of work, so dropping the future stops the run at
    /// the next suspension point.
    pub async fn run<S>(&mut self, sink: &mut S) -> RunSummary
    where
        S: ProgressSink + LogSink + ?Sized,
    {
        let outer_total = self.config.outer_count();
        let middle_total = self.config.middle_count();
        let inner_max = self.config.inner_max();
        let inner_steps = self.config.inner_steps_per_outer();

        let started = Instant::now();
        let mut summary = RunSummary::default();

        debug!(
            "Executor starting: outer={} middle={} inner={} p={}",
            outer_total,
            middle_total,
            inner_max,
            self.config.short_circuit_prob()
        );
        sink.record(LogEntry::info(format!(
            "Run started: outer={}, middle={}, inner={} (max), short-circuit={}",
            outer_total,
            middle_total,
            inner_max,
            self.config.short_circuit_prob()
        )));

        for outer in 1..=outer_total {
            sink.reset_inner(inner_steps);

            for middle in 1..=middle_total {
                self.work().await;
                summary.middle_completed += 1;
                sink.record(LogEntry::info(format!(
                    "Middle iteration {}/{} (outer={})",
                    middle, middle_total, outer
                )));
                sink.advance_inner();

                for inner in 1..=inner_max {
                    if self.should_short_circuit() {
                        summary.short_circuits += 1;
                        sink.record(LogEntry::warn(format!(
                            "Short-circuit before inner iteration {}/{} (outer={}, middle={})",
                            inner, inner_max, outer, middle
                        )));
                        break;
                    }

                    self.work().await;
                    summary.inner_completed += 1;
                    sink.record(LogEntry::info(format!(
                        "Inner iteration {}/{} (outer={}, middle={})",
                        inner, inner_max, outer, middle
                    )));
                    sink.advance_inner();
                }
            }

            sink.finish_inner();

            self.work().await;
            summary.outer_completed += 1;
            sink.record(LogEntry::info(format!("Outer iteration {}/{} complete", outer, outer_total)));
            sink.advance_outer();
        }

        summary.elapsed = truncate_to_millis(started.elapsed());
        sink.record(LogEntry::info(format!(
            "Run completed in {}: {} outer, {} middle, {} inner, {} short-circuits",
            summary.elapsed_display(),
            summary.outer_completed,
            summary.middle_completed,
            summary.inner_completed,
            summary.short_circuits
        )));
        debug!("Executor finished: {:?}", summary);

        summary
    }

    /// Independent draw for every inner step
    fn should_short_circuit(&mut self) -> bool {
        self.rng.random::<f64>() < self.config.short_circuit_prob()
    }

    fn work_duration(&mut self) -> Duration {
        let delay = self.config.work_delay();
        if delay.max > delay.min {
            let ms = self
                .rng
                .random_range(delay.min.as_millis() as u64..=delay.max.as_millis() as u64);
            Duration::from_millis(ms)
        } else {
            delay.min
        }
    }

    /// One simulated unit of work. Always a suspension point.
    async fn work(&mut self) {
        let duration = self.work_duration();
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogLevel, RunParams, WorkDelay};

    /// Records every callback in order.
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
        entries: Vec<LogEntry>,
    }

    impl ProgressSink for RecordingSink {
        fn advance_outer(&mut self) {
            self.events.push("outer".to_string());
        }

        fn reset_inner(&mut self, total: u64) {
            self.events.push(format!("reset:{}", total));
        }

        fn advance_inner(&mut self) {
            self.events.push("inner".to_string());
        }

        fn finish_inner(&mut self) {
            self.events.push("finish".to_string());
        }
    }

    impl LogSink for RecordingSink {
        fn record(&mut self, entry: LogEntry) {
            self.entries.push(entry);
        }
    }

    fn config(outer: u32, middle: u32, inner: u32, p: f64) -> RunConfig {
        RunConfig::new(RunParams {
            outer_count: outer,
            middle_count: middle,
            inner_max: inner,
            short_circuit_prob: p,
            work_delay: WorkDelay::none(),
            seed: Some(7),
            ..RunParams::default()
        })
        .unwrap()
    }

    async fn run(config: RunConfig) -> (RunSummary, RecordingSink) {
        let mut sink = RecordingSink::default();
        let mut executor = LoopExecutor::new(config);
        let summary = executor.run(&mut sink).await;
        (summary, sink)
    }

    #[tokio::test]
    async fn test_scenario_without_short_circuit() {
        let (summary, _) = run(config(2, 1, 3, 0.0)).await;
        assert_eq!(summary.outer_completed, 2);
        assert_eq!(summary.middle_completed, 2);
        assert_eq!(summary.inner_completed, 6);
        assert_eq!(summary.short_circuits, 0);
    }

    #[tokio::test]
    async fn test_outer_always_completes() {
        for p in [0.0, 0.3, 0.9, 1.0] {
            let (summary, sink) = run(config(7, 4, 5, p)).await;
            assert_eq!(summary.outer_completed, 7);
            assert_eq!(summary.middle_completed, 28);
            let outer_events = sink.events.iter().filter(|e| *e == "outer").count();
            assert_eq!(outer_events, 7);
        }
    }

    #[tokio::test]
    async fn test_zero_probability_runs_every_inner_step() {
        let (summary, _) = run(config(3, 4, 20, 0.0)).await;
        assert_eq!(summary.inner_completed, 3 * 4 * 20);
        assert_eq!(summary.short_circuits, 0);
    }

    #[tokio::test]
    async fn test_certain_short_circuit_skips_all_inner_steps() {
        let (summary, sink) = run(config(3, 4, 20, 1.0)).await;
        assert_eq!(summary.inner_completed, 0);
        assert_eq!(summary.short_circuits, 12);
        let warnings = sink.entries.iter().filter(|e| e.level == LogLevel::Warn).count();
        assert_eq!(warnings, 12);
    }

    #[tokio::test]
    async fn test_zero_outer_is_empty_run() {
        let (summary, sink) = run(config(0, 10, 20, 0.5)).await;
        assert_eq!(summary, RunSummary { elapsed: summary.elapsed, ..Default::default() });
        assert!(sink.events.is_empty());
        // Only the run started/completed bracket
        assert_eq!(sink.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_progress_event_order() {
        let (_, sink) = run(config(1, 2, 2, 0.0)).await;
        assert_eq!(
            sink.events,
            vec![
                "reset:6", "inner", "inner", "inner", "inner", "inner", "inner", "finish", "outer"
            ]
        );
    }

    #[tokio::test]
    async fn test_one_log_entry_per_unit_of_work() {
        let (summary, sink) = run(config(2, 3, 4, 0.0)).await;
        let units = summary.outer_completed + summary.middle_completed + summary.inner_completed;
        // Plus the run started and run completed entries
        assert_eq!(sink.entries.len() as u64, units + 2);
        assert!(sink.entries[0].message.starts_with("Run started"));
        assert!(sink.entries.last().unwrap().message.starts_with("Run completed"));
    }

    #[tokio::test]
    async fn test_inner_advances_never_exceed_reset_total() {
        let (_, sink) = run(config(4, 10, 20, 0.2)).await;
        let mut total = 0u64;
        let mut done = 0u64;
        for event in &sink.events {
            if let Some(t) = event.strip_prefix("reset:") {
                total = t.parse().unwrap();
                done = 0;
            } else if event == "inner" {
                done += 1;
                assert!(done <= total);
            }
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_run() {
        let (a, sink_a) = run(config(5, 5, 10, 0.4)).await;
        let (b, sink_b) = run(config(5, 5, 10, 0.4)).await;
        assert_eq!(a.inner_completed, b.inner_completed);
        assert_eq!(a.short_circuits, b.short_circuits);
        assert_eq!(sink_a.events, sink_b.events);
    }

    #[tokio::test]
    async fn test_with_injected_rng() {
        let rng = StdRng::seed_from_u64(99);
        let mut executor = LoopExecutor::with_rng(config(1, 1, 5, 0.0), rng);
        let mut sink = RecordingSink::default();
        let summary = executor.run(&mut sink).await;
        assert_eq!(summary.inner_completed, 5);
        assert_eq!(executor.config().outer_count(), 1);
    }

    #[tokio::test]
    async fn test_short_circuit_counts_match_inner_totals() {
        let (summary, _) = run(config(10, 10, 20, 0.3)).await;
        // Every middle iteration either short-circuits once or runs all inner steps
        let full_runs = summary.middle_completed - summary.short_circuits;
        assert!(summary.inner_completed >= full_runs * 20);
        assert!(summary.inner_completed <= summary.middle_completed * 20);
    }
}
