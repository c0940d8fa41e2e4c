//! Shared utility functions for collection and display

use std::path::Path;

use glob::Pattern;

/// Units walked by [`format_by_unit`], smallest first.
const UNITS: [&str; 6] = ["byte", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count by repeated truncating division by 1024.
///
/// Division stops as soon as the value drops below 1024 or the largest
/// unit is reached, so values beyond 1024 PB stay in PB.
pub fn format_by_unit(bytes: u64) -> String {
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024 && unit + 1 < UNITS.len() {
        value /= 1024;
        unit += 1;
    }
    format!("{} {}", value, UNITS[unit])
}

/// Ignore patterns compiled once for a whole walk.
///
/// A name is ignored when it equals one of the raw patterns or matches one
/// of them as a glob. Patterns that are not valid globs only match exactly.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    names: Vec<String>,
    globs: Vec<Pattern>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            names: patterns.to_vec(),
            globs: patterns.iter().filter_map(|p| Pattern::new(p).ok()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if an entry name should be skipped.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name) || self.globs.iter().any(|g| g.matches(name))
    }
}

/// Display name of a path: its final component, or the whole path for `/`.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
