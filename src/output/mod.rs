//! Tree formatting and display
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Connectors, prefixes and colors shared by formatters
//! - `tree` - Formatter that renders a collected `DirTree`

mod config;
mod tree;
mod utils;

// Re-export public types and functions
pub use config::OutputConfig;
pub use tree::TreeFormatter;
pub use utils::{LAST_CONNECTOR, SIZE_SEPARATOR, TEE_CONNECTOR, connector, continuation_prefix};
