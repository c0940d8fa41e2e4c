//! Collector - walks a directory tree and aggregates sizes bottom-up

use std::path::Path;

use indextree::NodeId;

use crate::fs::{EntryKind, FileSystem, OsFileSystem, ReadDirError};

use super::config::CollectorConfig;
use super::node::DirTree;
use super::progress::{NoProgress, Progress};
use super::utils::IgnoreMatcher;

/// Why a directory contributed nothing to its parent's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFailure {
    /// The directory could not be opened.
    Unreadable,
    /// The directory opened but its entries could not be listed.
    Unlistable,
}

/// Outcome of collecting one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collected {
    Accessible(u64),
    Inaccessible(AccessFailure),
}

impl Collected {
    /// Size contributed to the parent; inaccessible directories count as zero.
    pub fn size(self) -> u64 {
        match self {
            Collected::Accessible(size) => size,
            Collected::Inaccessible(_) => 0,
        }
    }

    pub fn is_accessible(self) -> bool {
        matches!(self, Collected::Accessible(_))
    }
}

/// Counters for a single collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Directories visited, root included.
    pub directories: usize,
    /// Directories that could not be opened or listed.
    pub inaccessible: usize,
}

/// Depth-first directory walker.
///
/// Symlinks are never followed. Failures to read a directory are folded
/// into a size of zero and never abort the walk.
pub struct Collector<F = OsFileSystem, P = NoProgress> {
    config: CollectorConfig,
    ignore: IgnoreMatcher,
    fs: F,
    progress: P,
    stats: CollectStats,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            ignore: IgnoreMatcher::new(&config.ignore_patterns),
            config,
            fs: OsFileSystem,
            progress: NoProgress,
            stats: CollectStats::default(),
        }
    }
}

impl<F: FileSystem, P: Progress> Collector<F, P> {
    pub fn with_filesystem<G: FileSystem>(self, fs: G) -> Collector<G, P> {
        Collector {
            config: self.config,
            ignore: self.ignore,
            fs,
            progress: self.progress,
            stats: self.stats,
        }
    }

    pub fn with_progress<Q: Progress>(self, progress: Q) -> Collector<F, Q> {
        Collector {
            config: self.config,
            ignore: self.ignore,
            fs: self.fs,
            progress,
            stats: self.stats,
        }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Counters from the most recent [`collect_tree`](Self::collect_tree) run.
    pub fn stats(&self) -> CollectStats {
        self.stats
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Walk `root` and return the tree of retained directories.
    ///
    /// The root node is always present, whatever its size.
    pub fn collect_tree(&mut self, root: &Path) -> DirTree {
        self.stats = CollectStats::default();
        let mut tree = DirTree::new(root);
        let root_id = tree.root();
        let outcome = self.collect(&mut tree, root_id);
        tracing::debug!(
            root = %root.display(),
            size = outcome.size(),
            directories = self.stats.directories,
            inaccessible = self.stats.inaccessible,
            "collected directory tree"
        );
        self.progress.finish(self.stats.directories);
        tree
    }

    /// Collect the directory at `id`, which must not have children yet.
    ///
    /// Subdirectories are added below `id` and kept only when their size
    /// exceeds the threshold. The node's `total_size` is set to the
    /// returned size.
    pub fn collect(&mut self, tree: &mut DirTree, id: NodeId) -> Collected {
        let path = tree.node(id).path.clone();
        self.stats.directories += 1;
        self.progress.directory_visited(&path, self.stats.directories);

        let entries = match self.fs.read_dir(&path) {
            Ok(entries) => entries,
            Err(err) => return self.inaccessible(tree, id, &path, err),
        };

        for entry in entries {
            if self.ignore.matches(&entry.name) {
                continue;
            }

            match entry.kind {
                // Never followed, never counted
                EntryKind::Symlink => {}
                EntryKind::File => {
                    let node = tree.node_mut(id);
                    node.total_size = node.total_size.saturating_add(entry.size);
                }
                EntryKind::Dir => {
                    let child = tree.add_child(id, path.join(&entry.name));
                    let size = self.collect(tree, child).size();
                    let child_incomplete = tree.node(child).incomplete;

                    let node = tree.node_mut(id);
                    node.total_size = node.total_size.saturating_add(size);
                    node.incomplete |= child_incomplete;

                    if !self.config.retains(size) {
                        tree.discard(child);
                    }
                }
            }
        }

        Collected::Accessible(tree.node(id).total_size)
    }

    fn inaccessible(
        &mut self,
        tree: &mut DirTree,
        id: NodeId,
        path: &Path,
        err: ReadDirError,
    ) -> Collected {
        self.stats.inaccessible += 1;
        tree.node_mut(id).incomplete = true;

        match err {
            ReadDirError::Open(source) => {
                tracing::debug!(path = %path.display(), error = %source, "cannot open directory");
                Collected::Inaccessible(AccessFailure::Unreadable)
            }
            ReadDirError::Enumerate(source) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "cannot get information of directory"
                );
                Collected::Inaccessible(AccessFailure::Unlistable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_utils::MemoryFileSystem;

    const ROOT: &str = "/scan";

    fn collect(fs: MemoryFileSystem, threshold: u64) -> DirTree {
        Collector::new(CollectorConfig::with_threshold(threshold))
            .with_filesystem(fs)
            .collect_tree(Path::new(ROOT))
    }

    fn child_names(tree: &DirTree, id: NodeId) -> Vec<String> {
        tree.children(id).map(|c| tree.node(c).name.clone()).collect()
    }

    fn find(tree: &DirTree, name: &str) -> NodeId {
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            if tree.node(id).name == name {
                return id;
            }
            stack.extend(tree.children(id));
        }
        panic!("no retained node named {}", name);
    }

    #[test]
    fn test_sizes_aggregate_recursively() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/a.bin", 100);
        fs.file("/scan/sub/b.bin", 200);
        fs.file("/scan/sub/deeper/c.bin", 300);

        let tree = collect(fs, 0);
        assert_eq!(tree.root_node().total_size, 600);
        assert_eq!(tree.node(find(&tree, "sub")).total_size, 500);
        assert_eq!(tree.node(find(&tree, "deeper")).total_size, 300);
        assert!(!tree.root_node().incomplete);
    }

    #[test]
    fn test_child_retained_only_above_threshold() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/big/f", 101);
        fs.file("/scan/exact/f", 100);
        fs.file("/scan/small/f", 99);
        fs.dir("/scan/empty");

        let tree = collect(fs, 100);
        assert_eq!(child_names(&tree, tree.root()), vec!["big"]);
        // Filtered children still count toward the parent
        assert_eq!(tree.root_node().total_size, 300);
    }

    #[test]
    fn test_filtered_subtree_is_dropped_entirely() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/keep/f", 1000);
        fs.file("/scan/drop/inner/f", 10);

        let tree = collect(fs, 500);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.root_node().total_size, 1010);
    }

    #[test]
    fn test_root_always_present() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/tiny", 1);

        let tree = collect(fs, 10_000_000);
        assert_eq!(tree.root_node().name, "scan");
        assert_eq!(tree.root_node().total_size, 1);
        assert!(!tree.has_children(tree.root()));
    }

    #[test]
    fn test_plain_file_creates_no_node() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/huge.iso", 20_000_000);

        let tree = collect(fs, 10_000_000);
        assert_eq!(tree.root_node().total_size, 20_000_000);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_symlinks_are_not_counted() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/real/f", 50);
        fs.symlink("/scan/real/loop");
        fs.symlink("/scan/alias");

        let tree = collect(fs, 0);
        assert_eq!(tree.root_node().total_size, 50);
        assert_eq!(child_names(&tree, tree.root()), vec!["real"]);
    }

    #[test]
    fn test_unreadable_directory_counts_as_zero() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/ok/f", 40);
        fs.file("/scan/locked/secret", 1000);
        fs.unreadable("/scan/locked");

        let mut collector = Collector::new(CollectorConfig::with_threshold(0)).with_filesystem(fs);
        let tree = collector.collect_tree(Path::new(ROOT));

        assert_eq!(tree.root_node().total_size, 40);
        assert_eq!(child_names(&tree, tree.root()), vec!["ok"]);
        assert!(tree.root_node().incomplete);
        assert!(!tree.node(find(&tree, "ok")).incomplete);
        assert_eq!(
            collector.stats(),
            CollectStats {
                directories: 3,
                inaccessible: 1
            }
        );
    }

    #[test]
    fn test_failure_kinds_are_distinguished() {
        let mut fs = MemoryFileSystem::new();
        fs.dir("/scan/locked");
        fs.dir("/scan/broken");
        fs.unreadable("/scan/locked");
        fs.unlistable("/scan/broken");

        let mut collector = Collector::new(CollectorConfig::default()).with_filesystem(fs);
        let mut tree = DirTree::new("/scan/locked");
        let root = tree.root();
        assert_eq!(
            collector.collect(&mut tree, root),
            Collected::Inaccessible(AccessFailure::Unreadable)
        );

        let mut tree = DirTree::new("/scan/broken");
        let root = tree.root();
        assert_eq!(
            collector.collect(&mut tree, root),
            Collected::Inaccessible(AccessFailure::Unlistable)
        );
        assert!(tree.root_node().incomplete);
    }

    #[test]
    fn test_unreadable_root_is_zero() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/f", 10);
        fs.unreadable("/scan");

        let tree = collect(fs, 0);
        assert_eq!(tree.root_node().total_size, 0);
        assert!(tree.root_node().incomplete);
    }

    #[test]
    fn test_incomplete_propagates_through_filtered_child() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/big/f", 1000);
        fs.dir("/scan/small/locked");
        fs.unreadable("/scan/small/locked");

        let tree = collect(fs, 500);
        assert_eq!(child_names(&tree, tree.root()), vec!["big"]);
        assert!(tree.root_node().incomplete);
    }

    #[test]
    fn test_ignore_patterns_skip_entries() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/src/main.rs", 10);
        fs.file("/scan/target/debug/app", 5000);
        fs.file("/scan/core.tmp", 700);

        let config = CollectorConfig {
            threshold: 0,
            ignore_patterns: vec!["target".to_string(), "*.tmp".to_string()],
        };
        let tree = Collector::new(config)
            .with_filesystem(fs)
            .collect_tree(Path::new(ROOT));
        assert_eq!(tree.root_node().total_size, 10);
        assert_eq!(child_names(&tree, tree.root()), vec!["src"]);
    }

    #[test]
    fn test_ignore_patterns_compiled_at_construction() {
        let config = CollectorConfig {
            threshold: 0,
            ignore_patterns: vec!["*.tmp".to_string(), "[".to_string()],
        };
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/[/f", 40);
        fs.file("/scan/core.tmp", 700);
        fs.file("/scan/keep/f", 5);

        let mut collector = Collector::new(config).with_filesystem(fs);
        assert!(collector.ignore.matches("a.tmp"));
        assert!(collector.ignore.matches("["));

        let tree = collector.collect_tree(Path::new(ROOT));
        assert_eq!(tree.root_node().total_size, 5);
        assert_eq!(child_names(&tree, tree.root()), vec!["keep"]);
    }

    #[test]
    fn test_children_keep_traversal_order() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/zeta/f", 10);
        fs.file("/scan/alpha/f", 30);
        fs.file("/scan/mid/f", 20);

        let tree = collect(fs, 0);
        assert_eq!(child_names(&tree, tree.root()), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_child_paths_and_parents() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/a/b/f", 10);

        let tree = collect(fs, 0);
        let b = find(&tree, "b");
        let a = tree.parent(b).unwrap();
        assert_eq!(tree.node(b).path, PathBuf::from("/scan/a/b"));
        assert_eq!(tree.node(b).depth, 2);
        assert_eq!(tree.node(a).name, "a");
        assert_eq!(tree.parent(a), Some(tree.root()));
    }

    #[test]
    fn test_sizes_saturate() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/a", u64::MAX);
        fs.file("/scan/b", 10);

        let tree = collect(fs, 0);
        assert_eq!(tree.root_node().total_size, u64::MAX);
    }

    #[derive(Default)]
    struct Recorder {
        visited: Vec<(PathBuf, usize)>,
        finished: Option<usize>,
    }

    impl Progress for Recorder {
        fn directory_visited(&mut self, path: &Path, visited: usize) {
            self.visited.push((path.to_path_buf(), visited));
        }

        fn finish(&mut self, visited: usize) {
            self.finished = Some(visited);
        }
    }

    #[test]
    fn test_progress_sees_every_directory() {
        let mut fs = MemoryFileSystem::new();
        fs.file("/scan/a/f", 1);
        fs.dir("/scan/b");

        let mut collector = Collector::new(CollectorConfig::default())
            .with_filesystem(fs)
            .with_progress(Recorder::default());
        collector.collect_tree(Path::new(ROOT));

        let progress = collector.progress();
        let counts: Vec<usize> = progress.visited.iter().map(|(_, n)| *n).collect();
        assert_eq!(counts, vec![1, 2, 3]);
        assert_eq!(progress.visited[0].0, PathBuf::from("/scan"));
        assert_eq!(progress.finished, Some(3));
    }

    #[test]
    fn test_stats_reset_between_runs() {
        let mut fs = MemoryFileSystem::new();
        fs.dir("/scan/a");

        let mut collector = Collector::new(CollectorConfig::default()).with_filesystem(fs);
        collector.collect_tree(Path::new(ROOT));
        collector.collect_tree(Path::new(ROOT));
        assert_eq!(collector.stats().directories, 2);
    }
}
