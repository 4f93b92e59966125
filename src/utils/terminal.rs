//! Terminal detection.

use std::io::{self, IsTerminal};

/// Check if coloured output should be written to stdout.
///
/// True only when stdout is a terminal and `NO_COLOR` is not set.
pub fn stdout_color() -> bool {
    color_enabled(io::stdout().is_terminal(), no_color_set())
}

/// Check if coloured output should be written to stderr.
pub fn stderr_color() -> bool {
    color_enabled(io::stderr().is_terminal(), no_color_set())
}

fn no_color_set() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

fn color_enabled(is_terminal: bool, no_color: bool) -> bool {
    is_terminal && !no_color
}
