/// Storage error types
use thiserror::Error;

/// Errors raised by the `SQLite` backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(String),

    /// Underlying database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data that cannot be decoded (bad JSON, bad date)
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Result type for storage setup operations
pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for cantor_core::CantorError {
    fn from(err: StorageError) -> Self {
        cantor_core::CantorError::Store(err.to_string())
    }
}
