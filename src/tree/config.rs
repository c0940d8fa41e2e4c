//! Configuration types for the collector

/// Threshold used when none is given on the command line.
pub const DEFAULT_THRESHOLD: u64 = 10_000_000;

/// Configuration for directory collection.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Subdirectories are retained only when their size is strictly greater than this.
    pub threshold: u64,
    /// Entry names (or globs) excluded from both traversal and size.
    pub ignore_patterns: Vec<String>,
}

impl CollectorConfig {
    pub fn with_threshold(threshold: u64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Whether a directory of `size` bytes is kept as a visible child.
    pub fn retains(&self, size: u64) -> bool {
        size > self.threshold
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            ignore_patterns: Vec::new(),
        }
    }
}
