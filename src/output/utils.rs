//! Shared utility functions for output formatting

use termcolor::{Color, ColorSpec};

/// Connector drawn before the last child of a directory.
pub const LAST_CONNECTOR: &str = "└── ";
/// Connector drawn before every other child.
pub const TEE_CONNECTOR: &str = "├── ";

/// Separator between a directory name and its size.
pub const SIZE_SEPARATOR: &str = " .. ";

pub fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_CONNECTOR } else { TEE_CONNECTOR }
}

/// Calculate the prefix for the children of a node drawn with `prefix`.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

pub fn name_color() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Blue)).set_bold(true);
    spec
}

/// Sizes of incomplete directories are lower bounds and are drawn in yellow.
pub fn size_color(incomplete: bool) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(if incomplete { Color::Yellow } else { Color::Green }));
    spec
}
