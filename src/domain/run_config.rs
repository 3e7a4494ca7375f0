//! Run configuration: the validated, immutable parameters of one simulated run.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TaskflowError};

/// Allowed number of outer iterations
pub const OUTER_RANGE: RangeInclusive<u32> = 0..=1000;
/// Allowed number of middle iterations per outer iteration
pub const MIDDLE_RANGE: RangeInclusive<u32> = 0..=10;
/// Allowed maximum of inner iterations per middle iteration
pub const INNER_RANGE: RangeInclusive<u32> = 1..=20;
/// Upper limit for a single simulated unit of work
pub const MAX_WORK_DELAY: Duration = Duration::from_secs(1);

/// Bounds of the simulated delay for one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkDelay {
    pub min: Duration,
    pub max: Duration,
}

impl WorkDelay {
    /// Create a delay range from millisecond bounds
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// A delay range that never sleeps (work still yields to the runtime)
    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }
}

impl Default for WorkDelay {
    fn default() -> Self {
        Self::from_millis(10, 50)
    }
}

/// Unvalidated run parameters, as collected from the CLI and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub outer_count: u32,
    pub middle_count: u32,
    pub inner_max: u32,
    pub short_circuit_prob: f64,
    pub report_path: PathBuf,
    pub show_splash: bool,
    pub work_delay: WorkDelay,
    pub seed: Option<u64>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            outer_count: 5,
            middle_count: 3,
            inner_max: 10,
            short_circuit_prob: 0.3,
            report_path: PathBuf::from("report.md"),
            show_splash: true,
            work_delay: WorkDelay::default(),
            seed: None,
        }
    }
}

/// Validated run configuration. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    outer_count: u32,
    middle_count: u32,
    inner_max: u32,
    short_circuit_prob: f64,
    report_path: PathBuf,
    show_splash: bool,
    work_delay: WorkDelay,
    seed: Option<u64>,
}

fn check_range(field: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(TaskflowError::config(
            field,
            value,
            format!("between {} and {}", range.start(), range.end()),
        ))
    }
}

impl RunConfig {
    /// Validate parameters and freeze them into a config.
    ///
    /// Fails with [`TaskflowError::Config`] naming the first offending field.
    pub fn new(params: RunParams) -> Result<Self> {
        check_range("--outer", params.outer_count, &OUTER_RANGE)?;
        check_range("--middle", params.middle_count, &MIDDLE_RANGE)?;
        check_range("--inner", params.inner_max, &INNER_RANGE)?;

        // NaN fails this check too
        if !(0.0..=1.0).contains(&params.short_circuit_prob) {
            return Err(TaskflowError::config(
                "--short-circuit",
                params.short_circuit_prob,
                "between 0.0 and 1.0",
            ));
        }

        let is_markdown = params
            .report_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if !is_markdown {
            return Err(TaskflowError::config(
                "--report",
                params.report_path.display(),
                "a path with a .md extension",
            ));
        }

        let delay = params.work_delay;
        if delay.min > delay.max || delay.max > MAX_WORK_DELAY {
            return Err(TaskflowError::config(
                "work delay",
                format!("{}..{}ms", delay.min.as_millis(), delay.max.as_millis()),
                format!("min <= max <= {}ms", MAX_WORK_DELAY.as_millis()),
            ));
        }

        Ok(Self {
            outer_count: params.outer_count,
            middle_count: params.middle_count,
            inner_max: params.inner_max,
            short_circuit_prob: params.short_circuit_prob,
            report_path: params.report_path,
            show_splash: params.show_splash,
            work_delay: params.work_delay,
            seed: params.seed,
        })
    }

    pub fn outer_count(&self) -> u32 {
        self.outer_count
    }

    pub fn middle_count(&self) -> u32 {
        self.middle_count
    }

    pub fn inner_max(&self) -> u32 {
        self.inner_max
    }

    pub fn short_circuit_prob(&self) -> f64 {
        self.short_circuit_prob
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    pub fn show_splash(&self) -> bool {
        self.show_splash
    }

    pub fn work_delay(&self) -> WorkDelay {
        self.work_delay
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Upper bound of combined middle+inner progress steps in one outer iteration.
    ///
    /// Every middle iteration advances once, plus at most `inner_max` inner advances.
    /// `middle_count + inner_max` is not used: it undercounts once `middle_count > 1`.
    pub fn inner_steps_per_outer(&self) -> u64 {
        u64::from(self.middle_count) * (u64::from(self.inner_max) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RunParams {
        RunParams::default()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = RunConfig::new(params()).unwrap();
        assert_eq!(config.outer_count(), 5);
        assert_eq!(config.middle_count(), 3);
        assert_eq!(config.inner_max(), 10);
        assert_eq!(config.short_circuit_prob(), 0.3);
        assert_eq!(config.report_path(), Path::new("report.md"));
        assert!(config.show_splash());
        assert_eq!(config.work_delay(), WorkDelay::from_millis(10, 50));
        assert!(config.seed().is_none());
    }

    #[test]
    fn test_boundaries_accepted() {
        let low = RunParams {
            outer_count: 0,
            middle_count: 0,
            inner_max: 1,
            short_circuit_prob: 0.0,
            ..params()
        };
        assert!(RunConfig::new(low).is_ok());

        let high = RunParams {
            outer_count: 1000,
            middle_count: 10,
            inner_max: 20,
            short_circuit_prob: 1.0,
            ..params()
        };
        assert!(RunConfig::new(high).is_ok());
    }

    #[test]
    fn test_middle_out_of_range() {
        let err = RunConfig::new(RunParams {
            middle_count: 11,
            ..params()
        })
        .unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.to_string(), "Invalid --middle value 11: must be between 0 and 10");
    }

    #[test]
    fn test_outer_out_of_range() {
        let err = RunConfig::new(RunParams {
            outer_count: 1001,
            ..params()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--outer"));
    }

    #[test]
    fn test_inner_zero_rejected() {
        let err = RunConfig::new(RunParams {
            inner_max: 0,
            ..params()
        })
        .unwrap_err();
        assert!(err.to_string().contains("between 1 and 20"));
    }

    #[test]
    fn test_short_circuit_out_of_range() {
        let err = RunConfig::new(RunParams {
            short_circuit_prob: 1.5,
            ..params()
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid --short-circuit value 1.5: must be between 0.0 and 1.0"
        );

        let negative = RunConfig::new(RunParams {
            short_circuit_prob: -0.1,
            ..params()
        });
        assert!(negative.is_err());
    }

    #[test]
    fn test_short_circuit_nan_rejected() {
        let result = RunConfig::new(RunParams {
            short_circuit_prob: f64::NAN,
            ..params()
        });
        assert!(result.unwrap_err().is_config());
    }

    #[test]
    fn test_report_extension() {
        let err = RunConfig::new(RunParams {
            report_path: PathBuf::from("out/report.txt"),
            ..params()
        })
        .unwrap_err();
        assert!(err.to_string().contains(".md extension"));

        let upper = RunConfig::new(RunParams {
            report_path: PathBuf::from("REPORT.MD"),
            ..params()
        });
        assert!(upper.is_ok());
    }

    #[test]
    fn test_work_delay_inverted() {
        let err = RunConfig::new(RunParams {
            work_delay: WorkDelay::from_millis(50, 10),
            ..params()
        })
        .unwrap_err();
        assert!(err.to_string().contains("work delay"));
    }

    #[test]
    fn test_work_delay_too_long() {
        let result = RunConfig::new(RunParams {
            work_delay: WorkDelay::from_millis(0, 5000),
            ..params()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_inner_steps_per_outer() {
        let config = RunConfig::new(RunParams {
            middle_count: 3,
            inner_max: 10,
            ..params()
        })
        .unwrap();
        assert_eq!(config.inner_steps_per_outer(), 33);

        let empty = RunConfig::new(RunParams {
            middle_count: 0,
            ..params()
        })
        .unwrap();
        assert_eq!(empty.inner_steps_per_outer(), 0);
    }
}
