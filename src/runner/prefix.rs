//! Output labels and their colours.

use crossterm::style::{Color, Stylize};

/// Background colours handed out to labels, in order.
pub const PALETTE: [Color; 6] = [
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::DarkRed,
];

/// Round-robin colour slot counter for one run.
///
/// Owned by the orchestrator and passed down to wherever a command is
/// resolved. Slots repeat once the palette is exhausted.
#[derive(Debug, Default)]
pub struct Palette {
    next: usize,
}

impl Palette {
    /// Create a counter starting at the first colour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next slot.
    pub fn next_slot(&mut self) -> usize {
        let slot = self.next % PALETTE.len();
        self.next += 1;
        slot
    }
}

/// Label of one command's output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPrefix {
    /// Text of the label, if the command is labelled.
    pub label: Option<String>,
    /// Index into [`PALETTE`].
    pub color_slot: usize,
}

impl OutputPrefix {
    /// Labelled prefix.
    pub fn labelled(label: impl Into<String>, color_slot: usize) -> Self {
        Self {
            label: Some(label.into()),
            color_slot,
        }
    }

    /// Prefix without a label.
    pub fn unlabelled(color_slot: usize) -> Self {
        Self {
            label: None,
            color_slot,
        }
    }

    /// Render the label followed by the separator space.
    ///
    /// Returns `None` for unlabelled prefixes.
    pub fn render(&self, color: bool) -> Option<String> {
        let label = self.label.as_ref()?;
        let tag = format!(" {label} ");
        let tag = if color {
            tag.on(PALETTE[self.color_slot % PALETTE.len()]).to_string()
        } else {
            tag
        };
        Some(format!("{tag} "))
    }
}

/// Short label for an executable: its basename up to the first space.
///
/// # Examples
///
/// ```
/// use cross_run::runner::command_label;
///
/// assert_eq!(command_label("/usr/local/bin/node"), "node");
/// assert_eq!(command_label("tsc"), "tsc");
/// ```
pub fn command_label(executable: &str) -> String {
    let base = executable
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(executable);
    script_label(base)
}

/// Short label for a script name: its first word.
pub fn script_label(script: &str) -> String {
    script.split(' ').next().unwrap_or(script).to_string()
}
