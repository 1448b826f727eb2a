//! Error types for classification.
//!
//! Only batch-level problems surface as [`Error`]. Failures that concern a
//! single file (hashing, copying) are recorded in the report's fail list and
//! never abort the batch.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a classification run.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed (creating output directories, walking the tree).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The generated tree could not be walked.
    #[error("Failed to walk generated tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The generated root is missing or not a directory.
    #[error("Invalid generated directory: {0}")]
    InvalidGeneratedRoot(Utf8PathBuf),

    /// The source (base installation) root is missing or not a directory.
    #[error("Invalid source directory: {0}")]
    InvalidSourceRoot(Utf8PathBuf),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
