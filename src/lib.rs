//! Sizetree - a tree command that shows only the directories eating your disk

pub mod error;
pub mod fs;
pub mod output;
pub mod root;
pub mod size;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::SizetreeError;
pub use fs::{DirEntryInfo, EntryKind, FileSystem, OsFileSystem, ReadDirError};
pub use output::{OutputConfig, TreeFormatter};
pub use root::resolve_root;
pub use size::parse_size;
pub use tree::{
    Collected, Collector, CollectorConfig, ConsoleProgress, DirNode, DirTree, NoProgress,
    Progress, format_by_unit,
};
