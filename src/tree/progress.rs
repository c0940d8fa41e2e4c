//! Progress reporting during collection

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Report every this many directories by default.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Observer notified as the collector visits directories.
/// Purely observational: nothing it does can change the collected tree.
pub trait Progress {
    /// Called once per directory, before its entries are read.
    fn directory_visited(&mut self, path: &Path, visited: usize);

    /// Called once after the walk completes.
    fn finish(&mut self, _visited: usize) {}
}

/// Progress observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn directory_visited(&mut self, _path: &Path, _visited: usize) {}
}

/// Overwrite-in-place status line, printed every `interval` directories.
pub struct ConsoleProgress<W: Write> {
    out: W,
    interval: usize,
    started: Instant,
    printed: bool,
}

impl ConsoleProgress<io::Stderr> {
    /// Report to stderr so stdout stays clean for the tree.
    pub fn stderr(interval: usize) -> Self {
        Self::new(io::stderr(), interval)
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, interval: usize) -> Self {
        Self {
            out,
            interval: interval.max(1),
            started: Instant::now(),
            printed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn directory_visited(&mut self, path: &Path, visited: usize) {
        if visited % self.interval != 0 {
            return;
        }
        // Write errors are ignored
        let _ = write!(
            self.out,
            "\r\x1b[2K{} directories scanned ({})",
            visited,
            path.display()
        );
        let _ = self.out.flush();
        self.printed = true;
    }

    fn finish(&mut self, visited: usize) {
        if self.printed {
            let _ = write!(self.out, "\r\x1b[2K");
            let _ = self.out.flush();
        }
        let elapsed = humantime::format_duration(self.started.elapsed());
        tracing::debug!(visited, %elapsed, "scan complete");
    }
}
