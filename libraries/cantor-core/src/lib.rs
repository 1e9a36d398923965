//! Cantor Core
//!
//! Platform-agnostic core types, traits, and error handling for Cantor.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Setlist`, `User` and their id newtypes
//! - **Store Contract**: the `DocumentStore` trait every backend implements
//! - **Identity**: `AuthUser` and the reactive `AuthState` subscription
//! - **Error Handling**: unified `CantorError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cantor_core::types::{Song, Setlist, User, UserId};
//! use chrono::NaiveDate;
//!
//! let user = User::new("alice@example.com", "Alice");
//!
//! let song = Song::new("Amazing Grace", "John Newton", "Amazing grace...");
//!
//! let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let mut setlist = Setlist::new(user.id.clone(), "Sunday Service", date);
//! setlist.song_ids.push(song.id.clone());
//! ```

#![forbid(unsafe_code)]

pub mod auth;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use auth::{AuthState, AuthUser};
pub use error::{CantorError, Result};
pub use traits::DocumentStore;
pub use types::{Setlist, SetlistId, Song, SongId, UpdateSong, User, UserId};
