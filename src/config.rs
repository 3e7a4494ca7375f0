use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use taskflow::domain::{RunParams, WorkDelay};
use taskflow::runner::SessionOptions;

use crate::cli::RunArgs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunDefaults,
    pub tui: TuiConfig,
}

/// Defaults for `taskflow run`; CLI flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    pub outer: u32,
    pub middle: u32,
    pub inner: u32,
    pub short_circuit: f64,
    pub report: PathBuf,
    pub splash: bool,
    pub work_delay_min_ms: u64,
    pub work_delay_max_ms: u64,
}

impl Default for RunDefaults {
    fn default() -> Self {
        let params = RunParams::default();
        Self {
            outer: params.outer_count,
            middle: params.middle_count,
            inner: params.inner_max,
            short_circuit: params.short_circuit_prob,
            report: params.report_path,
            splash: params.show_splash,
            work_delay_min_ms: params.work_delay.min.as_millis() as u64,
            work_delay_max_ms: params.work_delay.max.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub refresh_ms: u64,
    pub activity_lines: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            refresh_ms: 50,
            activity_lines: 10,
        }
    }
}

impl TuiConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            refresh: Duration::from_millis(self.refresh_ms),
            activity_lines: self.activity_lines,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Merge CLI flags over the file defaults. The result still needs validation.
    pub fn run_params(&self, args: &RunArgs) -> RunParams {
        let run = &self.run;
        RunParams {
            outer_count: args.outer.unwrap_or(run.outer),
            middle_count: args.middle.unwrap_or(run.middle),
            inner_max: args.inner.unwrap_or(run.inner),
            short_circuit_prob: args.short_circuit.unwrap_or(run.short_circuit),
            report_path: args.report.clone().unwrap_or_else(|| run.report.clone()),
            show_splash: run.splash && !args.no_splash,
            work_delay: WorkDelay::from_millis(run.work_delay_min_ms, run.work_delay_max_ms),
            seed: args.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_run_params() {
        let config = Config::default();
        assert_eq!(config.run_params(&RunArgs::default()), RunParams::default());
        assert_eq!(config.tui.tick_rate_ms, 100);
        assert_eq!(config.tui.session_options(), SessionOptions::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taskflow.yml");
        fs::write(
            &path,
            "run:\n  outer: 2\n  short_circuit: 0.0\n  splash: false\ntui:\n  activity_lines: 4\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.run.outer, 2);
        assert_eq!(config.run.short_circuit, 0.0);
        assert!(!config.run.splash);
        // Unset keys keep their defaults
        assert_eq!(config.run.middle, 3);
        assert_eq!(config.tui.activity_lines, 4);
        assert_eq!(config.tui.refresh_ms, 50);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "run: [not, a, map]\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::default();
        config.run.outer = 9;
        config.run.report = PathBuf::from("from-file.md");

        let args = RunArgs {
            outer: Some(1),
            no_splash: true,
            seed: Some(5),
            ..RunArgs::default()
        };
        let params = config.run_params(&args);
        assert_eq!(params.outer_count, 1);
        assert_eq!(params.report_path, PathBuf::from("from-file.md"));
        assert!(!params.show_splash);
        assert_eq!(params.seed, Some(5));
    }

    #[test]
    fn test_file_values_are_not_prevalidated() {
        let mut config = Config::default();
        config.run.middle = 11;
        let params = config.run_params(&RunArgs::default());
        assert_eq!(params.middle_count, 11);
        assert!(taskflow::domain::RunConfig::new(params).is_err());
    }
}
