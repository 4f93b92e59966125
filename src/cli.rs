//! CLI argument definitions for cross-run.
//!
//! Uses clap with derive macros for argument parsing.
//!
//! # Example
//!
//! ```no_run
//! use cross_run::cli::Cli;
//! use cross_run::config::Config;
//!
//! let cli = Cli::parse_args();
//! let run_config = cli.run_config(&Config::default()).unwrap();
//! println!("Mode: {:?}", run_config.mode);
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};

use crate::config::{Config, RunConfig, RunMode};
use crate::error::Result;
use crate::package::PackageManager;

/// Run commands the same way on every platform.
///
/// Leading NAME=value arguments set environment variables for the run.
/// $NAME, ${NAME} and %NAME% are expanded in every argument. A command
/// starting with npm:<script> runs a package.json script; globs such as
/// npm:build:* run every matching script.
#[derive(Parser, Debug)]
#[command(name = "cross-run")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Fail when a referenced variable is not set
    #[arg(short, long)]
    pub strict: bool,

    /// Treat each argument as a separate command, run one after another
    #[arg(short, long)]
    pub multiple: bool,

    /// Treat each argument as a separate command, run all at once
    #[arg(short, long)]
    pub parallel: bool,

    /// Forward output untouched (no labels, no diagnostics)
    #[arg(short, long)]
    pub raw: bool,

    /// Print each command line before running it
    #[arg(short, long)]
    pub verbose: bool,

    /// Package manager for npm: commands (npm, yarn or pnpm)
    #[arg(short = 'o', long = "override-pm", value_name = "PM")]
    pub override_pm: Option<String>,

    /// Show commands without executing
    #[arg(short, long)]
    pub dry_run: bool,

    /// Load .env, .env.local, .env.<NODE_ENV> and .env.<NODE_ENV>.local
    #[arg(short, long)]
    pub env: bool,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print an example config file
    #[arg(long)]
    pub example_config: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,

    /// Commands to run, optionally preceded by NAME=value assignments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub commands: Vec<String>,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Combine the switches with file configuration into a [`RunConfig`].
    ///
    /// A switch given on the command line always wins; otherwise the file
    /// value applies.
    ///
    /// # Errors
    ///
    /// Returns [`CrossRunError::ConfigConflict`] when both `--multiple` and
    /// `--parallel` are given and [`CrossRunError::InvalidPackageManager`]
    /// for an unknown package manager name.
    ///
    /// [`CrossRunError::ConfigConflict`]: crate::error::CrossRunError::ConfigConflict
    /// [`CrossRunError::InvalidPackageManager`]: crate::error::CrossRunError::InvalidPackageManager
    pub fn run_config(&self, config: &Config) -> Result<RunConfig> {
        let mode = RunMode::from_flags(self.multiple, self.parallel)?;

        let package_manager_override = self
            .override_pm
            .as_deref()
            .or(config.general.package_manager.as_deref())
            .map(str::parse::<PackageManager>)
            .transpose()?;

        Ok(RunConfig {
            mode,
            strict: self.strict || config.general.strict.unwrap_or(false),
            raw: self.raw || config.output.raw.unwrap_or(false),
            verbose: self.verbose || config.output.verbose.unwrap_or(false),
            dry_run: self.dry_run,
            package_manager_override,
            load_env_files: self.env,
        })
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, "cross-run", &mut std::io::stdout());
    }
}
