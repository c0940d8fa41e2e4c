//! Errors reported by the command-line layer

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SizetreeError {
    #[error("cannot access '{}': {source}", path.display())]
    InaccessibleRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot access '{}': Not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("invalid --limit '{value}': {reason}")]
    InvalidLimit { value: String, reason: String },
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T, E = SizetreeError> = std::result::Result<T, E>;
