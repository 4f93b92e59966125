//! Configuration module for cross-run.
//!
//! Handles loading and merging configuration from multiple sources:
//! - CLI arguments (highest priority)
//! - `--config <path>`
//! - Project-level `.cross-runrc.toml`
//! - User-level `~/.config/cross-run/config.toml`
//!
//! The merged result is flattened into a [`RunConfig`] for one invocation.

pub mod file;
mod run;
mod types;

pub use file::{generate_example_config, load_config, PROJECT_CONFIG_FILE};
pub use run::{RunConfig, RunMode};
pub use types::{Config, GeneralConfig, OutputConfig};
