//! Custom error types for cross-run.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for cross-run.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// Any failure: mode conflict, unknown variable, unmatched script,
    /// non-zero child exit or spawn error.
    pub const FAILURE: i32 = 1;
}

/// Main error type for the run engine.
#[derive(Error, Debug)]
pub enum CrossRunError {
    /// Sequential and concurrent modes were both requested.
    #[error("Cannot use both --multiple and --parallel")]
    ConfigConflict,

    /// Package manager override is not one of the supported tools.
    #[error("Invalid package manager {name}")]
    InvalidPackageManager { name: String },

    /// Strict expansion hit a name missing from the environment.
    #[error("Unknown environment variable {name}")]
    UnknownVariable { name: String },

    /// A command string could not be split into tokens.
    #[error("Failed to split command '{command}': {message}")]
    InvalidCommand { command: String, message: String },

    /// A script glob matched no declared script.
    #[error("No scripts matched {pattern}")]
    NoScriptMatched { pattern: String },

    /// A script glob is not a valid pattern.
    #[error("Invalid script pattern '{pattern}': {message}")]
    InvalidScriptPattern { pattern: String, message: String },

    /// An `npm:` command was requested but no package manager is available.
    #[error("Can't run {command}, no package manager available")]
    NoPackageManager { command: String },

    /// The manifest could not be read.
    #[error("Failed to read {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or has an unexpected shape.
    #[error("Failed to parse {path}:\n  {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The shell layer could not be launched.
    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran but exited with a failure code.
    #[error("Command exited with code {code}.")]
    NonZeroExit { command: String, code: i32 },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CrossRunError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        exit_code::FAILURE
    }

    /// Whether this error came from a child process rather than from
    /// resolution. The spawner prints its own diagnostic for these unless
    /// output is raw.
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            CrossRunError::SpawnFailure { .. } | CrossRunError::NonZeroExit { .. }
        )
    }
}

/// Result type alias for cross-run operations.
pub type Result<T> = std::result::Result<T, CrossRunError>;
