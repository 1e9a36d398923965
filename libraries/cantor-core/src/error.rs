/// Core error types for Cantor
use crate::types::{SetlistId, SongId, UserId};
use thiserror::Error;

/// Result type alias using `CantorError`
pub type Result<T> = std::result::Result<T, CantorError>;

/// Core error type for Cantor
#[derive(Error, Debug)]
pub enum CantorError {
    /// Document-store errors (network, query, constraint)
    #[error("Store error: {0}")]
    Store(String),

    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Setlist not found
    #[error("Setlist not found: {0}")]
    SetlistNotFound(SetlistId),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Permission denied
    #[error("Permission denied")]
    PermissionDenied,

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDeniedWithContext(String),

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store call exceeded its deadline
    #[error("Store call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CantorError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDeniedWithContext(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CantorError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}
