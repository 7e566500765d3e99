//! Snapshot storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Error types for snapshot storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored document is not valid JSON of the expected shape
    #[error("Malformed snapshot {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization of a document failed
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Renaming the temporary file over the target failed
    #[error("Could not replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Convenience result alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StorageError::Io { path, source }
    }
}
