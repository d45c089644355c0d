//! Error types for snapshot stores.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while storing or retrieving a snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored text is not valid JSON, or the value could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot path cannot be used as a file.
    #[error("invalid snapshot path: {}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
    },
}
