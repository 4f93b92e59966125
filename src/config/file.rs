//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::types::Config;

/// Name of the project-level configuration file.
pub const PROJECT_CONFIG_FILE: &str = ".cross-runrc.toml";

/// Load configuration from the specified path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Load a default-location file, warning instead of failing when it is broken.
fn load_optional(path: &Path, config: &mut Config) {
    if !path.exists() {
        return;
    }
    match load_config_from_path(path) {
        Ok(loaded) => {
            debug!(path = %path.display(), "loaded config file");
            config.merge(loaded);
        }
        Err(e) => warn!(path = %path.display(), "ignoring config file: {e:#}"),
    }
}

/// Load configuration with proper priority and merging.
///
/// Sources in order of priority (lowest to highest):
/// 1. `~/.config/cross-run/config.toml`
/// 2. `.cross-runrc.toml` in the project directory
/// 3. the `--config <path>` argument
///
/// Missing default files are skipped.
///
/// # Errors
///
/// Returns an error if the CLI-specified file cannot be read or parsed.
pub fn load_config(cli_config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(user_config_path) = Config::user_config_path() {
        load_optional(&user_config_path, &mut config);
    }

    load_optional(&project_dir.join(PROJECT_CONFIG_FILE), &mut config);

    if let Some(cli_path) = cli_config_path {
        let cli_config = load_config_from_path(cli_path).with_context(|| {
            format!(
                "Failed to load config from CLI-specified path: {}",
                cli_path.display()
            )
        })?;
        config.merge(cli_config);
    }

    Ok(config)
}

/// Generate an example configuration file with all options documented.
pub fn generate_example_config() -> String {
    r#"# cross-run configuration file
# Place this file at ~/.config/cross-run/config.toml for global settings
# or .cross-runrc.toml in your project directory for project-specific settings

[general]
# Package manager for npm: commands (overrides lock file detection)
# Options: "npm", "yarn", "pnpm"
# package_manager = "pnpm"

# Fail when a referenced variable is not set
strict = false

[output]
# Forward child output untouched (no labels, no diagnostics)
raw = false

# Print each command line before running it
verbose = false
"#
    .to_string()
}
