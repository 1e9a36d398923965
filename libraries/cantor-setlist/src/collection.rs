/// Setlist collection operations
///
/// Wraps the document store with the ordered-collection semantics the rest
/// of the application relies on: setlists persist song ids only, and the
/// full songs are resolved at read time, in sequence order, with dangling
/// references silently dropped.
use crate::error::{Result, SetlistError};
use cantor_core::{
    traits::DocumentStore,
    types::{Setlist, SetlistId, Song, SongId, UserId},
    CantorError,
};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Default deadline for a single store call.
///
/// A call that exceeds it is reported as a failed write and handled through
/// the same rollback path as any other store error.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// A setlist joined with its resolved songs, in sequence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSetlist {
    /// The setlist record as persisted
    pub setlist: Setlist,

    /// Songs in the setlist's sequence order. Ids that no longer resolve
    /// to a library song are absent, so this can be shorter than
    /// `setlist.song_ids`.
    pub songs: Vec<Song>,
}

/// High-level setlist operations over a document store
pub struct SetlistService<S> {
    store: Arc<S>,
    call_timeout: Duration,
}

impl<S: DocumentStore> SetlistService<S> {
    /// Create a service with the default call deadline
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Create a service with a custom call deadline
    pub fn with_timeout(store: Arc<S>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }

    /// The wrapped store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Apply the call deadline to a store future
    async fn call<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = cantor_core::error::Result<T>>,
    {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(timeout = ?self.call_timeout, "store call exceeded deadline");
                Err(SetlistError::Core(CantorError::Timeout(self.call_timeout)))
            }
        }
    }

    /// Create a new, empty setlist for `owner`
    pub async fn create(
        &self,
        owner: &UserId,
        name: &str,
        service_date: NaiveDate,
    ) -> Result<Setlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CantorError::invalid_input("setlist name cannot be empty").into());
        }

        let setlist = Setlist::new(owner.clone(), name, service_date);
        self.call(self.store.insert_setlist(&setlist, owner)).await?;
        Ok(setlist)
    }

    /// All setlists owned by `owner`, newest service date first
    pub async fn list(&self, owner: &UserId) -> Result<Vec<Setlist>> {
        self.call(self.store.list_setlists(owner)).await
    }

    /// Rename a setlist
    pub async fn rename(&self, id: &SetlistId, name: &str, caller: &UserId) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CantorError::invalid_input("setlist name cannot be empty").into());
        }
        self.call(self.store.rename_setlist(id, name, caller)).await
    }

    /// Delete a setlist. Library songs are untouched.
    pub async fn delete(&self, id: &SetlistId, caller: &UserId) -> Result<()> {
        self.call(self.store.delete_setlist(id, caller)).await
    }

    /// Fetch a setlist and resolve its songs in sequence order.
    ///
    /// The batch get carries no ordering, so the persisted id sequence is
    /// re-projected over it here. Dangling ids (deleted songs) are dropped
    /// without error.
    pub async fn resolve(&self, id: &SetlistId, caller: &UserId) -> Result<ResolvedSetlist> {
        let setlist = self
            .call(self.store.get_setlist(id, caller))
            .await?
            .ok_or_else(|| CantorError::SetlistNotFound(id.clone()))?;

        let by_id = self.call(self.store.get_songs(&setlist.song_ids)).await?;

        // Lookup rather than removal so a repeated id resolves at every
        // occurrence, not just its first.
        let songs = setlist
            .song_ids
            .iter()
            .filter_map(|song_id| by_id.get(song_id).cloned())
            .collect();

        Ok(ResolvedSetlist { setlist, songs })
    }

    /// Append a song to the end of the sequence (no-op if already present)
    pub async fn add_song(
        &self,
        id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()> {
        self.call(self.store.append_song_id(id, song_id, caller))
            .await
    }

    /// Remove every occurrence of a song from the sequence
    pub async fn remove_song(
        &self,
        id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()> {
        self.call(self.store.remove_song_id(id, song_id, caller))
            .await
    }

    /// Replace the persisted sequence whole.
    ///
    /// Membership must be unchanged: this is a permutation primitive, not
    /// an add/remove path.
    pub async fn reorder(
        &self,
        id: &SetlistId,
        song_ids: &[SongId],
        caller: &UserId,
    ) -> Result<()> {
        self.call(self.store.set_song_ids(id, song_ids, caller))
            .await
    }
}
