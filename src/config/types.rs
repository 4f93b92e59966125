//! Configuration file types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// General configuration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Package manager to use instead of detecting one (`npm`, `yarn` or `pnpm`).
    #[serde(default)]
    pub package_manager: Option<String>,
    /// Fail on unknown variables.
    #[serde(default)]
    pub strict: Option<bool>,
}

/// Output configuration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Forward child output untouched.
    #[serde(default)]
    pub raw: Option<bool>,
    /// Echo command lines before running them.
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Main configuration structure.
///
/// Every value is optional so that merging only overrides what a file
/// actually sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Get the config file path for the user's home directory.
    pub fn user_config_path() -> Option<PathBuf> {
        crate::utils::global_config_file()
    }

    /// Merge another config into this one (other takes precedence for set values).
    pub fn merge(&mut self, other: Config) {
        if other.general.package_manager.is_some() {
            self.general.package_manager = other.general.package_manager;
        }
        if other.general.strict.is_some() {
            self.general.strict = other.general.strict;
        }
        if other.output.raw.is_some() {
            self.output.raw = other.output.raw;
        }
        if other.output.verbose.is_some() {
            self.output.verbose = other.output.verbose;
        }
    }
}
