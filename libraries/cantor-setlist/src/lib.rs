//! Cantor Setlist
//!
//! Ordered-collection logic for setlists: resolving a persisted id sequence
//! into songs, and the drag-and-drop reorder engine with optimistic preview
//! and rollback-on-failure.
//!
//! Ordering is never stored per-song; the setlist's id sequence is the one
//! source of truth, and every permutation is persisted as a whole-array
//! overwrite.

#![forbid(unsafe_code)]

pub mod collection;
pub mod error;
pub mod reorder;

pub use collection::{ResolvedSetlist, SetlistService, DEFAULT_CALL_TIMEOUT};
pub use error::{Result, SetlistError};
pub use reorder::{DragState, ReorderEngine};
