//! Environment module for cross-run.
//!
//! Builds the environment map for a run and expands variable references
//! in command tokens.

mod dotenv;
mod expand;
mod inline;

use std::collections::HashMap;

pub use dotenv::{env_file_names, load_env_files, DEFAULT_NODE_ENV};
pub use expand::expand;
pub use inline::split_inline_assignments;

/// Variable name to value. Order is irrelevant.
pub type EnvironmentMap = HashMap<String, String>;

/// Snapshot the inherited process environment.
///
/// Entries whose name or value is not valid Unicode are skipped.
pub fn process_environment() -> EnvironmentMap {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
