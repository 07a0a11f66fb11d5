use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced blob file no longer exists.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A blob path or file name that could escape the data root.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A poisoned lock in an in-memory backend.
    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
