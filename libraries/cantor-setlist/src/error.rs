/// Setlist engine error types
use cantor_core::CantorError;
use thiserror::Error;

/// Errors raised by setlist operations and the reorder engine
#[derive(Debug, Error)]
pub enum SetlistError {
    /// Error from the document store or domain rules
    #[error(transparent)]
    Core(#[from] CantorError),

    /// A drag gesture is already active
    #[error("A drag is already in progress")]
    DragInProgress,

    /// A previous drop is still being written to the store
    #[error("A reorder commit is still in progress")]
    CommitInProgress,

    /// Drag-gesture call with no active drag
    #[error("No active drag")]
    NoActiveDrag,

    /// Index outside the current sequence
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for setlist operations
pub type Result<T> = std::result::Result<T, SetlistError>;
