//! Test utilities for building directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fs::{DirEntryInfo, EntryKind, FileSystem, ReadDirError};

/// A temporary directory for testing.
///
/// Files are created with an exact logical length, so size assertions do not
/// depend on the content written. Cleaned up automatically when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file of `size` bytes.
    ///
    /// Creates parent directories as needed. The file is sparse where the
    /// platform supports it, so large sizes are cheap.
    pub fn add_file(&self, path: &str, size: u64) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        let file = fs::File::create(&full_path).expect("Failed to create file");
        file.set_len(size).expect("Failed to set file length");
        full_path
    }

    /// Add an empty directory (and any missing parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a symlink at `path` pointing to `target` (taken verbatim).
    #[cfg(unix)]
    pub fn add_symlink(&self, path: &str, target: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        std::os::unix::fs::symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Open,
    Enumerate,
}

/// In-memory [`FileSystem`] with a deterministic entry order.
///
/// Entries are listed in the order they were added. Adding a path creates
/// any missing parent directories.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: HashMap<PathBuf, Vec<DirEntryInfo>>,
    failures: HashMap<PathBuf, Failure>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and any missing parents).
    pub fn dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.ensure_dir(path.as_ref());
        self
    }

    /// Add a regular file of `size` bytes.
    pub fn file(&mut self, path: impl AsRef<Path>, size: u64) -> &mut Self {
        self.add_entry(path.as_ref(), EntryKind::File, size);
        self
    }

    /// Add a symlink. Its target is irrelevant because it is never followed.
    pub fn symlink(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.add_entry(path.as_ref(), EntryKind::Symlink, 0);
        self
    }

    /// Make opening `path` fail with permission denied.
    pub fn unreadable(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.failures.insert(path.as_ref().to_path_buf(), Failure::Open);
        self
    }

    /// Make listing `path` fail after it was opened.
    pub fn unlistable(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.failures
            .insert(path.as_ref().to_path_buf(), Failure::Enumerate);
        self
    }

    fn add_entry(&mut self, path: &Path, kind: EntryKind, size: u64) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        self.ensure_dir(parent);
        if let Some(listing) = self.dirs.get_mut(parent) {
            listing.push(DirEntryInfo::new(name.to_string_lossy(), kind, size));
        }
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), Vec::new());
        self.add_entry(path, EntryKind::Dir, 0);
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ReadDirError> {
        match self.failures.get(path) {
            Some(Failure::Open) => {
                return Err(ReadDirError::Open(io::Error::from(
                    io::ErrorKind::PermissionDenied,
                )));
            }
            Some(Failure::Enumerate) => {
                return Err(ReadDirError::Enumerate(io::Error::other(
                    "entry vanished during listing",
                )));
            }
            None => {}
        }

        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| ReadDirError::Open(io::Error::from(io::ErrorKind::NotFound)))
    }
}
