//! Utility module for cross-run.
//!
//! Logging setup, config file locations and terminal detection.

mod logging;
mod paths;
mod terminal;

pub use logging::{env_filter, init_tracing, DEBUG_FILTER, DEFAULT_FILTER};
pub use paths::{config_dir, global_config_file, local_config_file};
pub use terminal::{stderr_color, stdout_color};
