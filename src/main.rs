use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};

use taskflow::domain::RunConfig;
use taskflow::report::write_report;
use taskflow::runner::{PlainDisplay, RunOutcome, SessionOptions, run_session};
use taskflow::splash::write_splash;
use taskflow::tui::{self, Dashboard, EventHandler, ViewerRunner};
use taskflow::viewer::Viewer;

mod cli;
mod config;

use cli::output::{configuration_text, interrupted_text, summary_text};
use cli::{Cli, Commands, RunArgs};
use config::{Config, TuiConfig};

/// Exit status for a run stopped by the user (128 + SIGINT)
const EXIT_INTERRUPTED: i32 = 130;

/// How a `run` command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Completed,
    Interrupted,
}

/// Process exit status for a finished `run`; failures exit through `Err`
fn exit_code(status: RunStatus) -> i32 {
    match status {
        RunStatus::Completed => 0,
        RunStatus::Interrupted => EXIT_INTERRUPTED,
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskflow")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskflow.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<i32> {
    info!("Starting application (verbose={})", cli.is_verbose());

    match &cli.command {
        Commands::Run(args) => Ok(exit_code(handle_run_command(args, config).await?)),
        Commands::View { report_path } => {
            handle_view_command(report_path, &config.tui).await?;
            Ok(0)
        }
    }
}

/// Resolves on Ctrl+C delivered as a signal; never resolves if the handler cannot be installed
async fn ctrl_c_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Validate the run settings, then write the splash and configuration block.
///
/// Nothing is written when validation fails.
fn prepare_run<W: Write>(args: &RunArgs, config: &Config, out: &mut W) -> Result<RunConfig> {
    let run_config = RunConfig::new(config.run_params(args)).context("Invalid run configuration")?;
    info!("Run configuration: {:?}", run_config);

    if run_config.show_splash() {
        write_splash(out, env!("CARGO_PKG_VERSION")).context("Failed to write splash")?;
    }
    writeln!(out, "{}", configuration_text(&run_config)).context("Failed to write configuration")?;
    Ok(run_config)
}

async fn handle_run_command(args: &RunArgs, config: &Config) -> Result<RunStatus> {
    let run_config = prepare_run(args, config, &mut stdout())?;

    let options: SessionOptions = config.tui.session_options();
    let events = EventHandler::new(config.tui.tick_rate_ms);
    let interactive = tui::stdout_is_tty();
    let outcome = if interactive {
        let dashboard = Dashboard::new(tui::dashboard_height(options.activity_lines))
            .context("Failed to start dashboard")?;
        let interrupt = async {
            tokio::select! {
                () = events.wait_for_interrupt() => {}
                () = ctrl_c_signal() => {}
            }
        };
        run_session(&run_config, dashboard, options, interrupt).await
    } else {
        run_session(&run_config, PlainDisplay::new(stdout()), options, ctrl_c_signal()).await
    };

    match outcome {
        RunOutcome::Completed(report) => {
            let path = run_config.report_path();
            write_report(&report, path).context("Failed to write report")?;
            let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            println!("{}", summary_text(&report.summary, &shown));

            if args.view {
                if interactive {
                    events.settle().await.context("Failed to reset terminal input")?;
                }
                handle_view_command(path, &config.tui).await?;
            }
            Ok(RunStatus::Completed)
        }
        RunOutcome::Interrupted { entries_recorded } => {
            println!("{}", interrupted_text(entries_recorded));
            Ok(RunStatus::Interrupted)
        }
    }
}

async fn handle_view_command(report_path: &Path, tui_config: &TuiConfig) -> Result<()> {
    info!("Opening report viewer for {}", report_path.display());

    let mut viewer = Viewer::new(report_path);
    viewer
        .load()
        .context(format!("Failed to open report {}", report_path.display()))?;

    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let mut runner = ViewerRunner::new(terminal, viewer, tui_config.tick_rate_ms);
    let result = runner.run().await;
    tui::restore_terminal().context("Failed to restore terminal")?;
    result.context("Viewer failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging before any work happens
    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    let code = run_application(&cli, &config).await.context("Application failed")?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
