//! cross-run - cross-platform command runner
//!
//! Entry point for the cross-run CLI application.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use cross_run::cli::Cli;
use cross_run::config::{generate_example_config, load_config, Config, RunMode};
use cross_run::error::{exit_code, CrossRunError};
use cross_run::runner::RunOrchestrator;
use cross_run::utils::{global_config_file, init_tracing, local_config_file};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            if let Some(cross_run_err) = err.downcast_ref::<CrossRunError>() {
                eprintln!("Error: {cross_run_err}");
                return ExitCode::from(cross_run_err.exit_code() as u8);
            }
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code::FAILURE as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    if cli.example_config {
        print!("{}", generate_example_config());
        return Ok(exit_code::SUCCESS);
    }

    init_tracing(cli.debug);
    debug!(version = env!("CARGO_PKG_VERSION"), ?cli, "starting");

    // a flag conflict is reported even when the config files are broken
    RunMode::from_flags(cli.multiple, cli.parallel)?;

    let project_dir = std::env::current_dir().context("Failed to determine working directory")?;
    log_config_paths(&project_dir);

    let config = if cli.no_config {
        Config::default()
    } else {
        load_config(cli.config.as_deref(), &project_dir)?
    };

    let run_config = cli.run_config(&config)?;
    debug!(?run_config, "resolved run configuration");

    let raw = run_config.raw;
    let orchestrator = RunOrchestrator::in_dir(run_config, project_dir);

    match orchestrator.run(&cli.commands) {
        Ok(()) => Ok(exit_code::SUCCESS),
        // the spawner has already reported the failing command
        Err(err) if err.is_process_failure() && !raw => Ok(err.exit_code()),
        Err(err) => Err(err.into()),
    }
}

fn log_config_paths(project_dir: &Path) {
    match global_config_file() {
        Some(path) => debug!(path = %path.display(), exists = path.exists(), "user config"),
        None => debug!("user config location not available"),
    }
    match local_config_file(project_dir) {
        Some(path) => debug!(path = %path.display(), "project config"),
        None => debug!(dir = %project_dir.display(), "no project config"),
    }
}
