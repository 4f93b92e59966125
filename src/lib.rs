//! cross-run - run commands the same way on every platform
//!
//! A small command runner for package.json scripts and CI steps. It sets
//! environment variables inline, expands `$NAME`, `${NAME}` and `%NAME%` on
//! every platform, runs several commands one after another or all at once,
//! and resolves `npm:<script>` references against the project's package
//! manager.
//!
//! # Features
//!
//! - **Inline environment**: `NODE_ENV=production webpack` works everywhere
//! - **Uniform expansion**: POSIX and Windows variable syntax in one pass
//! - **Sequential and concurrent runs**: with coloured, labelled output
//! - **Script globs**: `npm:build:*` runs every matching script
//! - **Package manager detection**: from yarn, pnpm and npm lock files
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface argument parsing
//! - [`config`] - Configuration files and per-run settings
//! - [`env`] - Inline assignments and variable expansion
//! - [`error`] - Error types and exit codes
//! - [`package`] - Package manager detection, package.json and script globs
//! - [`runner`] - Command resolution and execution
//! - [`utils`] - Logging, paths and terminal helpers
//!
//! # Example
//!
//! ```no_run
//! use cross_run::config::{RunConfig, RunMode};
//! use cross_run::runner::RunOrchestrator;
//!
//! let config = RunConfig {
//!     mode: RunMode::Concurrent,
//!     ..RunConfig::default()
//! };
//! let orchestrator = RunOrchestrator::new(config).expect("no working directory");
//!
//! let commands = vec!["NODE_ENV=test".to_string(), "npm:lint:*".to_string(), "tsc --noEmit".to_string()];
//! orchestrator.run(&commands).expect("a command failed");
//! ```

/// CLI argument definitions.
pub mod cli;

/// Configuration system for loading and merging settings.
pub mod config;

/// Inline environment assignments and variable expansion.
pub mod env;

/// Error types and result helpers.
pub mod error;

/// Package manager detection and package.json scripts.
pub mod package;

/// Command resolution and execution.
pub mod runner;

/// Logging, path and terminal utilities.
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{Config, RunConfig, RunMode};
pub use error::{CrossRunError, Result};
pub use runner::RunOrchestrator;
