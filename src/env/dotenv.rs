//! `.env` files from the project directory.

use std::path::Path;

use tracing::{debug, warn};

use super::EnvironmentMap;

/// `NODE_ENV` assumed when the environment does not set one.
pub const DEFAULT_NODE_ENV: &str = "development";

/// Candidate file names, highest precedence first.
///
/// # Examples
///
/// ```
/// use cross_run::env::env_file_names;
///
/// assert_eq!(
///     env_file_names("test"),
///     [".env", ".env.local", ".env.test", ".env.test.local"]
/// );
/// ```
pub fn env_file_names(node_env: &str) -> [String; 4] {
    [
        ".env".to_string(),
        ".env.local".to_string(),
        format!(".env.{node_env}"),
        format!(".env.{node_env}.local"),
    ]
}

/// Add the variables of every `.env` file in `dir` to `env`.
///
/// Files are chosen by the `NODE_ENV` already in `env`, defaulting to
/// [`DEFAULT_NODE_ENV`]. A variable that is already set is never replaced,
/// so the environment wins over every file and earlier files win over later
/// ones. Missing files are skipped. A file that cannot be read or parsed is
/// skipped as a whole with a warning.
pub fn load_env_files(dir: &Path, env: &mut EnvironmentMap) {
    let node_env = env
        .get("NODE_ENV")
        .cloned()
        .unwrap_or_else(|| DEFAULT_NODE_ENV.to_string());

    for name in env_file_names(&node_env) {
        let path = dir.join(&name);
        if !path.is_file() {
            continue;
        }

        match read_env_file(&path) {
            Ok(entries) => {
                debug!(path = %path.display(), count = entries.len(), "loaded env file");
                for (key, value) in entries {
                    env.entry(key).or_insert(value);
                }
            }
            Err(e) => warn!(path = %path.display(), "Failed to load {name}: {e}"),
        }
    }
}

fn read_env_file(path: &Path) -> dotenvy::Result<Vec<(String, String)>> {
    dotenvy::from_path_iter(path)?.collect()
}
