//! Word store errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or reading alphabet files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read alphabet file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a word array or a `{"words": [...]}` object.
    #[error("malformed alphabet file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A query needed a bucket that failed to load at startup.
    #[error("alphabet file {file_name} is unavailable: {reason}")]
    Unavailable { file_name: String, reason: String },
}

/// Result type for word store operations.
pub type StoreResult<T> = Result<T, StoreError>;
