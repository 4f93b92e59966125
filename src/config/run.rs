//! Settings for one invocation.

use crate::error::{CrossRunError, Result};
use crate::package::PackageManager;

/// How the positional arguments are run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// All arguments form one command.
    #[default]
    Single,
    /// Each argument is a command; run one after another.
    Sequential,
    /// Each argument is a command; run all at once.
    Concurrent,
}

impl RunMode {
    /// Build the mode from the `--multiple` and `--parallel` switches.
    ///
    /// # Errors
    ///
    /// Returns [`CrossRunError::ConfigConflict`] when both are set.
    pub fn from_flags(multiple: bool, parallel: bool) -> Result<Self> {
        match (multiple, parallel) {
            (true, true) => Err(CrossRunError::ConfigConflict),
            (true, false) => Ok(RunMode::Sequential),
            (false, true) => Ok(RunMode::Concurrent),
            (false, false) => Ok(RunMode::Single),
        }
    }

    /// Whether commands in this mode are labelled in the output.
    pub fn is_prefixed(&self) -> bool {
        !matches!(self, RunMode::Single)
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Execution mode.
    pub mode: RunMode,
    /// Fail on unknown variables instead of expanding them to nothing.
    pub strict: bool,
    /// Forward child output untouched: no labels, no diagnostics.
    pub raw: bool,
    /// Echo each command line before running it.
    pub verbose: bool,
    /// Print command lines instead of running them.
    pub dry_run: bool,
    /// Use this package manager instead of detecting one.
    pub package_manager_override: Option<PackageManager>,
    /// Read `.env` files from the project directory before running.
    pub load_env_files: bool,
}
