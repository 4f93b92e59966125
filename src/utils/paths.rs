//! Path utilities.

use std::path::{Path, PathBuf};

use crate::config::PROJECT_CONFIG_FILE;

/// Get the config directory for cross-run.
///
/// Returns `~/.config/cross-run` on Unix-like systems.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cross-run"))
}

/// Get the global config file path.
///
/// Returns `~/.config/cross-run/config.toml`.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Find local config file in project directory.
///
/// Looks for `.cross-runrc.toml` in the given directory.
pub fn local_config_file(project_dir: &Path) -> Option<PathBuf> {
    let config_file = project_dir.join(PROJECT_CONFIG_FILE);
    if config_file.exists() {
        Some(config_file)
    } else {
        None
    }
}
