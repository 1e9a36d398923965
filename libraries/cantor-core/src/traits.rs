/// Core traits for Cantor
use crate::error::Result;
use crate::types::{Setlist, SetlistId, Song, SongId, UpdateSong, User, UserId};
use std::collections::HashMap;

/// Document store contract
///
/// Models the hosted document database the application persists into. Only
/// the primitives the application actually uses are part of the contract:
/// get-by-id, batch get (order NOT guaranteed), query-with-sort, insert,
/// field updates including the three array-field primitives (union-append,
/// value-removal, whole-array overwrite), and delete.
///
/// Every write takes the caller's `UserId` so the implementation can enforce
/// ownership the way the hosted store's rule layer would. Implementations
/// must reject writes to setlists the caller does not own with
/// `CantorError::PermissionDenied`.
#[allow(async_fn_in_trait)]
pub trait DocumentStore: Send + Sync {
    // Song operations

    /// Get a song by ID, `None` if it does not exist
    async fn get_song(&self, id: &SongId) -> Result<Option<Song>>;

    /// Batch get songs by ID.
    ///
    /// Returns a keyed mapping; ids with no matching record are simply
    /// absent. The mapping carries NO ordering; callers that need the
    /// input order must re-project it themselves.
    async fn get_songs(&self, ids: &[SongId]) -> Result<HashMap<SongId, Song>>;

    /// Get all library songs, sorted by title
    async fn list_songs(&self) -> Result<Vec<Song>>;

    /// Add a song to the shared library (admin only, enforced by caller)
    async fn insert_song(&self, song: &Song, caller: &UserId) -> Result<()>;

    /// Update fields of a library song
    async fn update_song(&self, id: &SongId, update: &UpdateSong, caller: &UserId) -> Result<()>;

    /// Delete a library song.
    ///
    /// Setlists referencing the id keep their dangling reference; it is
    /// filtered out at read time.
    async fn delete_song(&self, id: &SongId, caller: &UserId) -> Result<()>;

    // Setlist operations

    /// Get a setlist by ID, `None` if it does not exist or the caller is
    /// not its owner
    async fn get_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<Option<Setlist>>;

    /// Get all setlists owned by a user, sorted by service date (newest
    /// first)
    async fn list_setlists(&self, owner: &UserId) -> Result<Vec<Setlist>>;

    /// Create a setlist
    async fn insert_setlist(&self, setlist: &Setlist, caller: &UserId) -> Result<()>;

    /// Rename a setlist
    async fn rename_setlist(&self, id: &SetlistId, name: &str, caller: &UserId) -> Result<()>;

    /// Delete a setlist. No cascading effect on songs.
    async fn delete_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<()>;

    // Array-field primitives on `song_ids`.
    //
    // These mirror the store's own array primitives: append/remove can
    // express membership changes but not a permutation, so reordering is
    // always a whole-array overwrite.

    /// Union-append: add the id to the end of the sequence unless already
    /// present (idempotent)
    async fn append_song_id(
        &self,
        setlist_id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()>;

    /// Value-removal: remove all occurrences of the id from the sequence
    async fn remove_song_id(
        &self,
        setlist_id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()>;

    /// Whole-array overwrite: atomically replace the persisted sequence
    async fn set_song_ids(
        &self,
        setlist_id: &SetlistId,
        song_ids: &[SongId],
        caller: &UserId,
    ) -> Result<()>;

    // User operations

    /// Create a user with a bcrypt password hash
    async fn create_user(&self, user: &User, password_hash: &str) -> Result<()>;

    /// Get a user by ID
    async fn get_user(&self, id: &UserId) -> Result<User>;

    /// Look up a user and their password hash by email, `None` if unknown
    async fn get_user_by_email(&self, email: &str) -> Result<Option<(User, String)>>;

    /// Get all users, sorted by name
    async fn get_all_users(&self) -> Result<Vec<User>>;
}
