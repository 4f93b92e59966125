//! Glob matching of script references against declared script names.

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::error::{CrossRunError, Result};

/// Characters that turn a script reference into a glob.
const GLOB_METACHARACTERS: &[char] = &['*', '?', '['];

/// Check if a script reference needs glob matching.
///
/// References without metacharacters are used verbatim and never matched
/// against the manifest.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_METACHARACTERS)
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// Match `pattern` against `declared` script names.
///
/// Supports `*`, `?` and `[...]` classes. `*` does not cross `/`. Matches
/// come back in declaration order.
///
/// # Errors
///
/// Returns [`CrossRunError::InvalidScriptPattern`] for a malformed pattern
/// and [`CrossRunError::NoScriptMatched`] when nothing matches.
///
/// # Examples
///
/// ```
/// use cross_run::package::match_scripts;
///
/// let declared: Vec<String> = ["build:css", "build:js", "test"].iter().map(|s| s.to_string()).collect();
/// assert_eq!(match_scripts("build:*", &declared).unwrap(), vec!["build:css", "build:js"]);
/// ```
pub fn match_scripts(pattern: &str, declared: &[String]) -> Result<Vec<String>> {
    let glob = Pattern::new(pattern).map_err(|e| CrossRunError::InvalidScriptPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let options = match_options();
    let matches: Vec<String> = declared
        .iter()
        .filter(|name| glob.matches_with(name, options))
        .cloned()
        .collect();

    debug!(pattern, ?matches, "matched scripts");

    if matches.is_empty() {
        return Err(CrossRunError::NoScriptMatched {
            pattern: pattern.to_string(),
        });
    }

    Ok(matches)
}
