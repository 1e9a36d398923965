/// Setlist domain types
use crate::types::{SetlistId, SongId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A named, dated, ordered collection of song references owned by one user.
///
/// `song_ids` is an ordered sequence with unique-in-practice membership:
/// the same id should not appear twice, order encodes performance sequence,
/// and a referenced id may no longer resolve to a library song (dangling ids
/// are filtered at read time, never rejected at write time).
///
/// The persisted sequence is the sole source of truth for playback order.
/// In-memory reorderings are not authoritative until the store write
/// succeeds; on failure, callers re-resolve from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setlist {
    /// Unique setlist identifier
    pub id: SetlistId,

    /// Owner user ID (no sharing; only the owner may read or write)
    pub owner_id: UserId,

    /// Setlist name
    pub name: String,

    /// Date of the service or event this setlist is for
    pub service_date: NaiveDate,

    /// Ordered song references
    pub song_ids: Vec<SongId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Setlist {
    /// Create a new, empty setlist
    pub fn new(owner_id: UserId, name: impl Into<String>, service_date: NaiveDate) -> Self {
        Self {
            id: SetlistId::generate(),
            owner_id,
            name: name.into(),
            service_date,
            song_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a setlist with a specific ID (for database loading)
    pub fn with_id(
        id: SetlistId,
        owner_id: UserId,
        name: impl Into<String>,
        service_date: NaiveDate,
        song_ids: Vec<SongId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            service_date,
            song_ids,
            created_at,
        }
    }

    /// Whether the setlist already references the given song
    pub fn contains(&self, song_id: &SongId) -> bool {
        self.song_ids.iter().any(|id| id == song_id)
    }
}
