//! Directory size collection
//!
//! This module walks a directory tree and builds an in-memory tree of the
//! directories worth showing:
//!
//! - `Collector`: depth-first walk that aggregates sizes bottom-up and keeps
//!   only subdirectories above the configured threshold
//! - `DirTree`: arena that owns every retained `DirNode`
//! - `Progress`: observer notified once per visited directory

mod collector;
mod config;
mod node;
mod progress;
mod utils;

// Re-export public types
pub use collector::{AccessFailure, CollectStats, Collected, Collector};
pub use config::{CollectorConfig, DEFAULT_THRESHOLD};
pub use node::{DirNode, DirTree};
pub use progress::{ConsoleProgress, DEFAULT_PROGRESS_INTERVAL, NoProgress, Progress};
pub use utils::{IgnoreMatcher, display_name, format_by_unit};

// Re-export the handle type so callers do not need indextree directly
pub use indextree::NodeId;
