/// In-memory document store
///
/// Implements the same contract as `SqliteStore`, including ownership and
/// admin rules, entirely in process memory. Used by the engine test suites
/// and anywhere a throwaway store is useful. Write failures can be injected
/// to exercise rollback paths.
use cantor_core::{
    error::Result,
    traits::DocumentStore,
    types::{Setlist, SetlistId, Song, SongId, UpdateSong, User, UserId},
    CantorError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    songs: HashMap<SongId, Song>,
    setlists: HashMap<SetlistId, Setlist>,
    users: HashMap<UserId, (User, String)>,
}

/// Document store held in process memory
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail until cleared.
    ///
    /// Reads are unaffected, so rollback-by-re-resolve still works while
    /// writes are failing.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a song directly, bypassing the admin rule (test setup)
    pub fn seed_song(&self, song: Song) {
        let mut inner = self.lock();
        inner.songs.insert(song.id.clone(), song);
    }

    /// Seed a setlist directly, bypassing ownership rules (test setup)
    pub fn seed_setlist(&self, setlist: Setlist) {
        let mut inner = self.lock();
        inner.setlists.insert(setlist.id.clone(), setlist);
    }

    /// Seed a user directly (test setup)
    pub fn seed_user(&self, user: User, password_hash: impl Into<String>) {
        let mut inner = self.lock();
        inner.users.insert(user.id.clone(), (user, password_hash.into()));
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CantorError::store("injected write failure"));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a seeding helper panicked mid-insert;
        // the map is still usable.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Inner {
    fn owned_setlist(&mut self, id: &SetlistId, caller: &UserId) -> Result<&mut Setlist> {
        let setlist = self
            .setlists
            .get_mut(id)
            .ok_or_else(|| CantorError::SetlistNotFound(id.clone()))?;
        if setlist.owner_id != *caller {
            return Err(CantorError::PermissionDenied);
        }
        Ok(setlist)
    }

    fn require_admin(&self, caller: &UserId) -> Result<()> {
        match self.users.get(caller) {
            Some((user, _)) if user.is_admin => Ok(()),
            Some(_) => Err(CantorError::permission_denied(
                "song library writes require an administrator",
            )),
            None => Err(CantorError::UserNotFound(caller.clone())),
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn get_song(&self, id: &SongId) -> Result<Option<Song>> {
        Ok(self.lock().songs.get(id).cloned())
    }

    async fn get_songs(&self, ids: &[SongId]) -> Result<HashMap<SongId, Song>> {
        let inner = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| inner.songs.get(id).map(|s| (id.clone(), s.clone())))
            .collect())
    }

    async fn list_songs(&self) -> Result<Vec<Song>> {
        let mut songs: Vec<Song> = self.lock().songs.values().cloned().collect();
        songs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(songs)
    }

    async fn insert_song(&self, song: &Song, caller: &UserId) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        inner.require_admin(caller)?;
        inner.songs.insert(song.id.clone(), song.clone());
        Ok(())
    }

    async fn update_song(&self, id: &SongId, update: &UpdateSong, caller: &UserId) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        inner.require_admin(caller)?;
        let song = inner
            .songs
            .get_mut(id)
            .ok_or_else(|| CantorError::SongNotFound(id.clone()))?;
        if let Some(title) = &update.title {
            song.title.clone_from(title);
        }
        if let Some(artist) = &update.artist {
            song.artist.clone_from(artist);
        }
        if let Some(lyrics) = &update.lyrics {
            song.lyrics.clone_from(lyrics);
        }
        Ok(())
    }

    async fn delete_song(&self, id: &SongId, caller: &UserId) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        inner.require_admin(caller)?;
        inner
            .songs
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CantorError::SongNotFound(id.clone()))
    }

    async fn get_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<Option<Setlist>> {
        let inner = self.lock();
        Ok(inner
            .setlists
            .get(id)
            .filter(|s| s.owner_id == *caller)
            .cloned())
    }

    async fn list_setlists(&self, owner: &UserId) -> Result<Vec<Setlist>> {
        let inner = self.lock();
        let mut setlists: Vec<Setlist> = inner
            .setlists
            .values()
            .filter(|s| s.owner_id == *owner)
            .cloned()
            .collect();
        setlists.sort_by(|a, b| b.service_date.cmp(&a.service_date));
        Ok(setlists)
    }

    async fn insert_setlist(&self, setlist: &Setlist, caller: &UserId) -> Result<()> {
        self.check_write()?;
        if setlist.owner_id != *caller {
            return Err(CantorError::PermissionDenied);
        }
        self.lock().setlists.insert(setlist.id.clone(), setlist.clone());
        Ok(())
    }

    async fn rename_setlist(&self, id: &SetlistId, name: &str, caller: &UserId) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        let setlist = inner.owned_setlist(id, caller)?;
        setlist.name = name.to_string();
        Ok(())
    }

    async fn delete_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        inner.owned_setlist(id, caller)?;
        inner.setlists.remove(id);
        Ok(())
    }

    async fn append_song_id(
        &self,
        setlist_id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        let setlist = inner.owned_setlist(setlist_id, caller)?;
        if !setlist.song_ids.contains(song_id) {
            setlist.song_ids.push(song_id.clone());
        }
        Ok(())
    }

    async fn remove_song_id(
        &self,
        setlist_id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        let setlist = inner.owned_setlist(setlist_id, caller)?;
        setlist.song_ids.retain(|id| id != song_id);
        Ok(())
    }

    async fn set_song_ids(
        &self,
        setlist_id: &SetlistId,
        song_ids: &[SongId],
        caller: &UserId,
    ) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        let setlist = inner.owned_setlist(setlist_id, caller)?;
        setlist.song_ids = song_ids.to_vec();
        Ok(())
    }

    async fn create_user(&self, user: &User, password_hash: &str) -> Result<()> {
        self.check_write()?;
        let mut inner = self.lock();
        if inner.users.values().any(|(u, _)| u.email == user.email) {
            return Err(CantorError::Duplicate(user.email.clone()));
        }
        inner
            .users
            .insert(user.id.clone(), (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User> {
        self.lock()
            .users
            .get(id)
            .map(|(user, _)| user.clone())
            .ok_or_else(|| CantorError::UserNotFound(id.clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<(User, String)>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|(user, _)| user.email == email)
            .cloned())
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.lock().users.values().map(|(u, _)| u.clone()).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}
