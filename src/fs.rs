//! Filesystem access used by the collector
//!
//! The collector never touches `std::fs` directly. It asks a [`FileSystem`]
//! for the entries of one directory at a time, which lets tests swap in an
//! in-memory tree with a fixed entry order.

use std::io;
use std::path::Path;

use thiserror::Error;

/// What kind of thing a directory entry is, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    Symlink,
    /// Regular files and every other non-directory, non-symlink entry.
    File,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub kind: EntryKind,
    /// Logical size in bytes as reported by the entry's own metadata.
    pub size: u64,
}

impl DirEntryInfo {
    pub fn new(name: impl Into<String>, kind: EntryKind, size: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            size,
        }
    }
}

/// Why a directory listing could not be produced.
#[derive(Debug, Error)]
pub enum ReadDirError {
    /// The directory itself could not be opened.
    #[error("cannot open directory: {0}")]
    Open(#[source] io::Error),
    /// The directory opened, but reading its entries failed part way.
    #[error("cannot read directory entries: {0}")]
    Enumerate(#[source] io::Error),
}

/// Open-and-list access to directories.
pub trait FileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ReadDirError>;
}

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ReadDirError> {
        let entries = std::fs::read_dir(path).map_err(ReadDirError::Open)?;

        let mut listing = Vec::new();
        for entry in entries {
            let entry = entry.map_err(ReadDirError::Enumerate)?;
            // DirEntry::file_type and DirEntry::metadata do not traverse symlinks
            let Some(file_type) = skip_vanished(entry.file_type())? else {
                tracing::debug!(path = %entry.path().display(), "entry vanished while listing");
                continue;
            };
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            let size = match kind {
                EntryKind::File => match skip_vanished(entry.metadata())? {
                    Some(metadata) => metadata.len(),
                    None => {
                        tracing::debug!(
                            path = %entry.path().display(),
                            "entry vanished while listing"
                        );
                        continue;
                    }
                },
                EntryKind::Dir | EntryKind::Symlink => 0,
            };
            listing.push(DirEntryInfo::new(
                entry.file_name().to_string_lossy().to_string(),
                kind,
                size,
            ));
        }

        Ok(listing)
    }
}

/// An entry removed between the listing and its lookup is left out.
/// Any other failure spoils the whole listing.
fn skip_vanished<T>(result: io::Result<T>) -> Result<Option<T>, ReadDirError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ReadDirError::Enumerate(err)),
    }
}
