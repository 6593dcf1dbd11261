use thiserror::Error;

/// Errors raised when the persistence medium cannot be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize recipe document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(String),

    /// Stored data violates a recipe invariant.
    #[error("corrupt recipe data: {0}")]
    Corrupt(String),
}
