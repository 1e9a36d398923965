/// Song domain types
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A song in the shared lyrics library.
///
/// Immutable reference data: created and edited by an administrator, read by
/// every user. Identity is the `id`; `title` and `artist` drive search and
/// sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Performing artist or author
    pub artist: String,

    /// Full lyrics text (newline-separated lines, may include section
    /// markers like `[Chorus]`)
    pub lyrics: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Song {
    /// Create a new song
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            id: SongId::generate(),
            title: title.into(),
            artist: artist.into(),
            lyrics: lyrics.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a song with a specific ID (for database loading)
    pub fn with_id(
        id: SongId,
        title: impl Into<String>,
        artist: impl Into<String>,
        lyrics: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            lyrics: lyrics.into(),
            created_at,
        }
    }

    /// Number of lyric lines, counting blank separator lines
    pub fn line_count(&self) -> usize {
        self.lyrics.lines().count()
    }
}

/// Fields accepted when updating a library song
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSong {
    /// New title, if changing
    pub title: Option<String>,

    /// New artist, if changing
    pub artist: Option<String>,

    /// New lyrics, if changing
    pub lyrics: Option<String>,
}
