//! Root path resolution

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SizetreeError};

/// Make `path` absolute and check that it names a readable directory entry.
///
/// Relative paths are resolved against the current directory and `.`/`..`
/// components are removed lexically. Symlinks are not resolved, so the
/// displayed root name is the one the user typed.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = std::path::absolute(path)
        .map(|absolute| normalize(&absolute))
        .map_err(|source| SizetreeError::InaccessibleRoot {
            path: path.to_path_buf(),
            source,
        })?;

    let metadata = std::fs::metadata(&root).map_err(|source| SizetreeError::InaccessibleRoot {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(SizetreeError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(root)
}

/// Drop `.` components and fold each `..` into its parent without touching
/// the filesystem. `..` above the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
