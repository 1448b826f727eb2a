//! Error types for archive and package creation.
//!
//! Chunk-level failures ([`Error::Staging`], [`Error::Tool`]) abort the current
//! archive set and are reported through
//! [`ArchiveManifest`](crate::ArchiveManifest); they are not raised past the
//! orchestrator.

use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating archives or assembling a package.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize package metadata.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a zip bundle failed.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Walking a bucket directory failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The external archiving tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A staging directory could not be created or populated.
    #[error("Staging failed for '{path}': {message}")]
    Staging { path: Utf8PathBuf, message: String },

    /// The maximum chunk size is not a positive, finite number of gigabytes.
    #[error("Invalid maximum chunk size: {0} GB")]
    InvalidChunkSize(f64),

    /// No plugin template exists for the requested game.
    #[error("Plugin template not found: {0}")]
    TemplateNotFound(Utf8PathBuf),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

/// Failure of an external tool invocation.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable (or its launcher) does not exist.
    #[error("Tool not found: {0}")]
    NotFound(Utf8PathBuf),

    /// The process could not be started.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("'{program}' exited with {status}: {output}")]
    Exit {
        program: String,
        status: String,
        output: String,
    },

    /// The process did not finish in time and was killed.
    #[error("'{program}' timed out after {secs}s", secs = .after.as_secs())]
    TimedOut { program: String, after: Duration },

    /// The process reported success but the expected output is missing or empty.
    #[error("Expected output was not produced: {0}")]
    MissingOutput(Utf8PathBuf),
}
