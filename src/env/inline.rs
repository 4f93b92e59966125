//! Inline `NAME=value` assignments ahead of the command.

use std::sync::OnceLock;

use regex::Regex;

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z0-9_-]+)=(.+)$").expect("valid assignment pattern")
    })
}

/// Split the leading `NAME=value` arguments off the argument list.
///
/// Only the leading run is consumed: the first argument that is not an
/// assignment starts the command, and everything after it is left alone.
/// The value is everything after the first `=`.
///
/// # Examples
///
/// ```
/// use cross_run::env::split_inline_assignments;
///
/// let args: Vec<String> = ["NODE_ENV=production", "node", "A=b"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let (assignments, rest) = split_inline_assignments(&args);
/// assert_eq!(assignments, vec![("NODE_ENV".to_string(), "production".to_string())]);
/// assert_eq!(rest, &args[1..]);
/// ```
pub fn split_inline_assignments(args: &[String]) -> (Vec<(String, String)>, &[String]) {
    let mut assignments = Vec::new();

    for (index, arg) in args.iter().enumerate() {
        let Some(caps) = assignment_pattern().captures(arg) else {
            return (assignments, &args[index..]);
        };
        assignments.push((caps[1].to_string(), caps[2].to_string()));
    }

    (assignments, &args[args.len()..])
}
