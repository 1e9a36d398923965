/// `SQLite` implementation of the document-store contract
use crate::error::StorageError;
use cantor_core::{
    error::Result,
    traits::DocumentStore,
    types::{Setlist, SetlistId, Song, SongId, UpdateSong, User, UserId},
    CantorError,
};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Document store backed by `SQLite`.
///
/// Ownership rules are enforced here, standing in for the hosted store's
/// rule layer: setlists are only visible to and writable by their owner,
/// and song-library writes require an admin caller.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a store over an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool (for testing)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fetch a setlist row and verify the caller owns it.
    ///
    /// Missing rows map to `SetlistNotFound` and foreign rows to
    /// `PermissionDenied`, the same distinction the hosted store's rules
    /// would produce.
    async fn owned_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<Setlist> {
        let row = sqlx::query(
            "SELECT id, owner_id, name, service_date, song_ids, created_at
             FROM setlists WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CantorError::SetlistNotFound(id.clone()))?;

        let setlist = setlist_from_row(&row)?;
        if setlist.owner_id != *caller {
            return Err(CantorError::PermissionDenied);
        }
        Ok(setlist)
    }

    /// Verify the caller may write the shared song library
    async fn require_admin(&self, caller: &UserId) -> Result<()> {
        let is_admin: Option<i64> =
            sqlx::query_scalar("SELECT is_admin FROM users WHERE id = ?")
                .bind(caller.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match is_admin {
            Some(1) => Ok(()),
            Some(_) => Err(CantorError::permission_denied(
                "song library writes require an administrator",
            )),
            None => Err(CantorError::UserNotFound(caller.clone())),
        }
    }

    /// Read-modify-write the `song_ids` array of an owned setlist.
    ///
    /// Runs inside an immediate transaction so two concurrent calls cannot
    /// both read the same pre-image and have the second write discard the
    /// first one's change.
    async fn update_song_ids(
        &self,
        setlist_id: &SetlistId,
        caller: &UserId,
        mutate: impl FnOnce(&mut Vec<SongId>),
    ) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        // BEGIN IMMEDIATE takes the write lock before the read; a deferred
        // transaction could fail to upgrade after it.
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = async {
            let row = sqlx::query(
                "SELECT id, owner_id, name, service_date, song_ids, created_at
                 FROM setlists WHERE id = ?",
            )
            .bind(setlist_id.as_str())
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| CantorError::SetlistNotFound(setlist_id.clone()))?;

            let mut setlist = setlist_from_row(&row)?;
            if setlist.owner_id != *caller {
                return Err(CantorError::PermissionDenied);
            }

            mutate(&mut setlist.song_ids);

            sqlx::query("UPDATE setlists SET song_ids = ? WHERE id = ?")
                .bind(serde_json::to_string(&setlist.song_ids)?)
                .bind(setlist_id.as_str())
                .execute(&mut *conn)
                .await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                Ok(())
            }
            Err(e) => {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                Err(e)
            }
        }
    }

    async fn write_song_ids(&self, setlist_id: &SetlistId, song_ids: &[SongId]) -> Result<()> {
        let encoded = serde_json::to_string(song_ids)?;
        sqlx::query("UPDATE setlists SET song_ids = ? WHERE id = ?")
            .bind(encoded)
            .bind(setlist_id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl DocumentStore for SqliteStore {
    // Song operations

    async fn get_song(&self, id: &SongId) -> Result<Option<Song>> {
        let row = sqlx::query(
            "SELECT id, title, artist, lyrics, created_at FROM songs WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(song_from_row).transpose()
    }

    async fn get_songs(&self, ids: &[SongId]) -> Result<HashMap<SongId, Song>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Dynamic IN clause; result order is whatever SQLite returns, which
        // is exactly the unordered-batch-get contract callers must handle.
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, title, artist, lyrics, created_at FROM songs WHERE id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;

        let mut songs = HashMap::with_capacity(rows.len());
        for row in &rows {
            let song = song_from_row(row)?;
            songs.insert(song.id.clone(), song);
        }
        Ok(songs)
    }

    async fn list_songs(&self) -> Result<Vec<Song>> {
        let rows = sqlx::query(
            "SELECT id, title, artist, lyrics, created_at FROM songs ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(song_from_row).collect()
    }

    async fn insert_song(&self, song: &Song, caller: &UserId) -> Result<()> {
        self.require_admin(caller).await?;

        sqlx::query(
            "INSERT INTO songs (id, title, artist, lyrics, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(song.id.as_str())
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.lyrics)
        .bind(song.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_song(&self, id: &SongId, update: &UpdateSong, caller: &UserId) -> Result<()> {
        self.require_admin(caller).await?;

        let existing = self
            .get_song(id)
            .await?
            .ok_or_else(|| CantorError::SongNotFound(id.clone()))?;

        sqlx::query("UPDATE songs SET title = ?, artist = ?, lyrics = ? WHERE id = ?")
            .bind(update.title.as_deref().unwrap_or(&existing.title))
            .bind(update.artist.as_deref().unwrap_or(&existing.artist))
            .bind(update.lyrics.as_deref().unwrap_or(&existing.lyrics))
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_song(&self, id: &SongId, caller: &UserId) -> Result<()> {
        self.require_admin(caller).await?;

        // Setlists referencing this id keep their dangling reference; the
        // resolver filters it out at read time.
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CantorError::SongNotFound(id.clone()));
        }
        Ok(())
    }

    // Setlist operations

    async fn get_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<Option<Setlist>> {
        match self.owned_setlist(id, caller).await {
            Ok(setlist) => Ok(Some(setlist)),
            Err(CantorError::SetlistNotFound(_) | CantorError::PermissionDenied) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_setlists(&self, owner: &UserId) -> Result<Vec<Setlist>> {
        let rows = sqlx::query(
            "SELECT id, owner_id, name, service_date, song_ids, created_at
             FROM setlists WHERE owner_id = ?
             ORDER BY service_date DESC, created_at DESC",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(setlist_from_row).collect()
    }

    async fn insert_setlist(&self, setlist: &Setlist, caller: &UserId) -> Result<()> {
        if setlist.owner_id != *caller {
            return Err(CantorError::PermissionDenied);
        }

        sqlx::query(
            "INSERT INTO setlists (id, owner_id, name, service_date, song_ids, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(setlist.id.as_str())
        .bind(setlist.owner_id.as_str())
        .bind(&setlist.name)
        .bind(setlist.service_date.to_string())
        .bind(serde_json::to_string(&setlist.song_ids)?)
        .bind(setlist.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn rename_setlist(&self, id: &SetlistId, name: &str, caller: &UserId) -> Result<()> {
        self.owned_setlist(id, caller).await?;

        sqlx::query("UPDATE setlists SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_setlist(&self, id: &SetlistId, caller: &UserId) -> Result<()> {
        self.owned_setlist(id, caller).await?;

        sqlx::query("DELETE FROM setlists WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Array-field primitives

    async fn append_song_id(
        &self,
        setlist_id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()> {
        self.update_song_ids(setlist_id, caller, |ids| {
            // Union semantics: appending a present id is a no-op
            if !ids.contains(song_id) {
                ids.push(song_id.clone());
            }
        })
        .await
    }

    async fn remove_song_id(
        &self,
        setlist_id: &SetlistId,
        song_id: &SongId,
        caller: &UserId,
    ) -> Result<()> {
        self.update_song_ids(setlist_id, caller, |ids| {
            ids.retain(|id| id != song_id);
        })
        .await
    }

    async fn set_song_ids(
        &self,
        setlist_id: &SetlistId,
        song_ids: &[SongId],
        caller: &UserId,
    ) -> Result<()> {
        self.owned_setlist(setlist_id, caller).await?;
        self.write_song_ids(setlist_id, song_ids).await
    }

    // User operations

    async fn create_user(&self, user: &User, password_hash: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, name, is_admin, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.name)
        .bind(i64::from(user.is_admin))
        .bind(password_hash)
        .bind(user.created_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                CantorError::Duplicate(user.email.clone())
            }
            other => other.into(),
        })?;

        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User> {
        let row = sqlx::query(
            "SELECT id, email, name, is_admin, created_at FROM users WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CantorError::UserNotFound(id.clone()))?;

        user_from_row(&row)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<(User, String)>> {
        let row = sqlx::query(
            "SELECT id, email, name, is_admin, password_hash, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(|row| {
                let user = user_from_row(row)?;
                let hash: String = row.get("password_hash");
                Ok((user, hash))
            })
            .transpose()
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, email, name, is_admin, created_at FROM users ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }
}

// Row mapping helpers

fn song_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Song> {
    Ok(Song::with_id(
        SongId::new(row.get::<String, _>("id")),
        row.get::<String, _>("title"),
        row.get::<String, _>("artist"),
        row.get::<String, _>("lyrics"),
        timestamp_from_row(row)?,
    ))
}

fn setlist_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Setlist> {
    let date_str: String = row.get("service_date");
    let service_date: NaiveDate = date_str
        .parse()
        .map_err(|_| StorageError::Corrupt(format!("invalid service date: {date_str}")))?;

    let song_ids: Vec<SongId> = serde_json::from_str(&row.get::<String, _>("song_ids"))
        .map_err(|e| StorageError::Corrupt(format!("invalid song_ids array: {e}")))?;

    Ok(Setlist::with_id(
        SetlistId::new(row.get::<String, _>("id")),
        UserId::new(row.get::<String, _>("owner_id")),
        row.get::<String, _>("name"),
        service_date,
        song_ids,
        timestamp_from_row(row)?,
    ))
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    Ok(User::with_id(
        UserId::new(row.get::<String, _>("id")),
        row.get::<String, _>("email"),
        row.get::<String, _>("name"),
        row.get::<i64, _>("is_admin") != 0,
        timestamp_from_row(row)?,
    ))
}

fn timestamp_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
        .ok_or_else(|| StorageError::Corrupt("invalid created_at timestamp".into()).into())
}
