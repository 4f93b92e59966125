//! Runner module for cross-run.
//!
//! Resolves commands and runs them through the platform shell, one at a
//! time or all at once, with labelled output.

mod orchestrator;
mod prefix;
mod spawner;

pub use orchestrator::{
    execute, run_concurrently, Plan, PlannedCommand, RunOrchestrator, SCRIPT_PREFIX,
};
pub use prefix::{command_label, script_label, OutputPrefix, Palette, PALETTE};
pub use spawner::{
    escape_path, escape_path_posix, escape_path_windows, render_chunk, CommandInvocation,
    OutputPolicy, ProcessSpawner, StreamLabels,
};
