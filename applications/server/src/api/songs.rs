/// Song library API routes
///
/// The library is shared: every signed-in user can read it, only admins
/// can write it. Admin enforcement lives in the store layer; handlers just
/// pass the caller through.
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use cantor_core::types::{Song, SongId, UpdateSong};
use cantor_core::DocumentStore;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

/// GET /api/songs
/// The whole library, sorted by title
pub async fn list_songs(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Song>>> {
    let songs = app_state.store.list_songs().await?;
    Ok(Json(songs))
}

/// GET /api/songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Song>> {
    let song = app_state
        .store
        .get_song(&SongId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;
    Ok(Json(song))
}

/// POST /api/songs
/// Add a song to the library (admin only)
pub async fn create_song(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateSongRequest>,
) -> Result<Json<Song>> {
    if req.title.trim().is_empty() {
        return Err(ServerError::BadRequest("Title is required".to_string()));
    }

    let song = Song::new(req.title.trim(), req.artist.trim(), req.lyrics);
    app_state.store.insert_song(&song, auth.user_id()).await?;

    tracing::info!(song = %song.id, "song added to library");
    Ok(Json(song))
}

/// PUT /api/songs/:id
/// Update song fields (admin only)
pub async fn update_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(update): Json<UpdateSong>,
) -> Result<Json<Song>> {
    let song_id = SongId::new(id);
    app_state
        .store
        .update_song(&song_id, &update, auth.user_id())
        .await?;

    let song = app_state
        .store
        .get_song(&song_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;
    Ok(Json(song))
}

/// DELETE /api/songs/:id
/// Remove a song from the library (admin only). Setlists referencing it
/// keep the id; it simply stops resolving.
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    app_state
        .store
        .delete_song(&SongId::new(id), auth.user_id())
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
