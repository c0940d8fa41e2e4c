//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Stop descending below this depth (root = 0). Sizes still cover the
    /// whole tree; only the display is cut.
    pub max_depth: Option<usize>,
}

impl OutputConfig {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Check if nodes at `depth` are shown without their children.
    pub fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_max_depth() {
        let unlimited = OutputConfig::plain();
        assert!(!unlimited.at_max_depth(1000));

        let limited = OutputConfig::plain().with_max_depth(2);
        assert!(!limited.at_max_depth(1));
        assert!(limited.at_max_depth(2));
        assert!(limited.at_max_depth(3));
    }
}
