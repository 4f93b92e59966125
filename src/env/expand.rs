//! Shell-agnostic environment variable expansion.
//!
//! Three reference syntaxes are recognised, in priority order:
//!
//! 1. `${NAME}`
//! 2. `$NAME`
//! 3. `%NAME%`
//!
//! where `NAME` is `[A-Za-z0-9_-]+`. Each syntax is applied in its own pass
//! over the text that came from the input; values substituted by an earlier
//! pass are never rescanned, so expansion is not recursive.
//!
//! There is no escape sequence for a literal `$` or `%` followed by a name
//! character. Such text is always treated as a reference.

use std::sync::OnceLock;

use regex::Regex;

use super::EnvironmentMap;
use crate::error::{CrossRunError, Result};

fn braced_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_-]+)\}").expect("valid braced pattern"))
}

fn bare_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$([A-Za-z0-9_-]+)").expect("valid bare pattern"))
}

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"%([A-Za-z0-9_-]+)%").expect("valid percent pattern"))
}

/// A piece of the string being expanded.
#[derive(Debug)]
enum Segment {
    /// Text from the input, still eligible for later passes.
    Source(String),
    /// A substituted value.
    Value(String),
}

/// Expand variable references in `input` using `env`.
///
/// Unknown names expand to the empty string unless `strict` is set, in which
/// case the first unknown name is reported as
/// [`CrossRunError::UnknownVariable`].
///
/// A bare `$NAME` whose full name is unknown falls back to the longest
/// hyphen-delimited prefix that is defined, leaving the rest literal, so
/// `$A-$B` reads as two references.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use cross_run::env::expand;
///
/// let env = HashMap::from([("A".to_string(), "1".to_string()), ("B".to_string(), "2".to_string())]);
/// assert_eq!(expand("$A-$B", &env, false).unwrap(), "1-2");
/// assert_eq!(expand("${A}%B%", &env, false).unwrap(), "12");
/// ```
pub fn expand(input: &str, env: &EnvironmentMap, strict: bool) -> Result<String> {
    let segments = vec![Segment::Source(input.to_string())];

    let segments = apply_pass(segments, braced_pattern(), |name| {
        Ok(vec![Segment::Value(lookup(env, name, strict)?)])
    })?;
    let segments = apply_pass(segments, bare_pattern(), |name| {
        expand_bare(env, name, strict)
    })?;
    let segments = apply_pass(segments, percent_pattern(), |name| {
        Ok(vec![Segment::Value(lookup(env, name, strict)?)])
    })?;

    Ok(segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Source(text) | Segment::Value(text) => text,
        })
        .collect())
}

/// Run one syntax over every source segment, replacing each match with the
/// segments produced by `substitute`.
fn apply_pass(
    segments: Vec<Segment>,
    pattern: &Regex,
    mut substitute: impl FnMut(&str) -> Result<Vec<Segment>>,
) -> Result<Vec<Segment>> {
    let mut out = Vec::with_capacity(segments.len());

    for segment in segments {
        let text = match segment {
            Segment::Source(text) => text,
            value @ Segment::Value(_) => {
                out.push(value);
                continue;
            }
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                out.push(Segment::Source(text[last..whole.start()].to_string()));
            }
            out.extend(substitute(name.as_str())?);
            last = whole.end();
        }
        if last < text.len() {
            out.push(Segment::Source(text[last..].to_string()));
        }
    }

    Ok(out)
}

fn lookup(env: &EnvironmentMap, name: &str, strict: bool) -> Result<String> {
    match env.get(name) {
        Some(value) => Ok(value.clone()),
        None if strict => Err(CrossRunError::UnknownVariable {
            name: name.to_string(),
        }),
        None => Ok(String::new()),
    }
}

fn expand_bare(env: &EnvironmentMap, name: &str, strict: bool) -> Result<Vec<Segment>> {
    if let Some(value) = env.get(name) {
        return Ok(vec![Segment::Value(value.clone())]);
    }

    let mut end = name.len();
    while let Some(hyphen) = name[..end].rfind('-') {
        end = hyphen;
        if let Some(value) = env.get(&name[..end]) {
            return Ok(vec![
                Segment::Value(value.clone()),
                Segment::Source(name[end..].to_string()),
            ]);
        }
    }

    Ok(vec![Segment::Value(lookup(env, name, strict)?)])
}
