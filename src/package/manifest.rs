//! Script names from package.json.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{CrossRunError, Result};

/// File name of the manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// The part of package.json this crate cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Raw scripts object, in declaration order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scripts: IndexMap<String, serde_json::Value>,
}

/// `"scripts": null` declares no scripts.
fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl Manifest {
    /// Script names in declaration order.
    pub fn script_names(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }
}

/// Read the declared script names from `project_dir/package.json`.
///
/// The file is read on every call; nothing is cached.
///
/// # Errors
///
/// Returns an error if:
/// - The package.json file cannot be read
/// - The JSON is malformed
pub fn read_declared_scripts(project_dir: &Path) -> Result<Vec<String>> {
    let path = project_dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|source| CrossRunError::ManifestRead {
        path: path.clone(),
        source,
    })?;

    let manifest = parse_manifest(&content).map_err(|message| CrossRunError::ManifestParse {
        path: path.clone(),
        message,
    })?;

    let names = manifest.script_names();
    debug!(path = %path.display(), count = names.len(), "read declared scripts");
    Ok(names)
}

/// Parse package.json content.
///
/// A missing or `null` `scripts` field is an empty script list. The error is a
/// human-readable message pointing at the offending line.
///
/// # Examples
///
/// ```
/// use cross_run::package::parse_manifest;
///
/// let json = r#"{"scripts": {"dev": "vite", "build": "vite build"}}"#;
/// let manifest = parse_manifest(json).unwrap();
/// assert_eq!(manifest.script_names(), vec!["dev", "build"]);
/// ```
pub fn parse_manifest(content: &str) -> std::result::Result<Manifest, String> {
    serde_json::from_str(content).map_err(|e| format_json_error(content, &e))
}

/// Format a JSON parsing error with context.
fn format_json_error(content: &str, error: &serde_json::Error) -> String {
    let line = error.line();
    let column = error.column();

    // Try to show the problematic line
    if let Some(error_line) = content.lines().nth(line.saturating_sub(1)) {
        let pointer = " ".repeat(column.saturating_sub(1)) + "^";
        format!(
            "{}\n  at line {}, column {}:\n    {}\n    {}",
            error, line, column, error_line, pointer
        )
    } else {
        format!("{} at line {}, column {}", error, line, column)
    }
}
