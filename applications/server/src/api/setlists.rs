/// Setlists API routes
///
/// All routes operate on the authenticated caller's own setlists; the
/// ownership rules in the store make everyone else's invisible.
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use cantor_core::types::{Setlist, SetlistId, Song, SongId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSetlistRequest {
    pub name: String,
    pub service_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RenameSetlistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    pub song_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub song_ids: Vec<String>,
}

/// A setlist with its songs resolved in sequence order
#[derive(Debug, Serialize)]
pub struct SetlistDetail {
    #[serde(flatten)]
    pub setlist: Setlist,

    /// Resolved songs; shorter than `song_ids` when references dangle
    pub songs: Vec<Song>,
}

/// GET /api/setlists
/// The caller's setlists, newest service date first
pub async fn list_setlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Setlist>>> {
    let setlists = app_state.setlists.list(auth.user_id()).await?;
    Ok(Json(setlists))
}

/// POST /api/setlists
pub async fn create_setlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateSetlistRequest>,
) -> Result<Json<Setlist>> {
    let setlist = app_state
        .setlists
        .create(auth.user_id(), &req.name, req.service_date)
        .await?;

    tracing::info!(setlist = %setlist.id, "setlist created");
    Ok(Json(setlist))
}

/// GET /api/setlists/:id
/// Setlist with songs resolved in order
pub async fn get_setlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<SetlistDetail>> {
    let resolved = app_state
        .setlists
        .resolve(&SetlistId::new(id), auth.user_id())
        .await?;

    Ok(Json(SetlistDetail {
        setlist: resolved.setlist,
        songs: resolved.songs,
    }))
}

/// PUT /api/setlists/:id
/// Rename
pub async fn rename_setlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<RenameSetlistRequest>,
) -> Result<Json<serde_json::Value>> {
    app_state
        .setlists
        .rename(&SetlistId::new(id), &req.name, auth.user_id())
        .await?;
    Ok(Json(serde_json::json!({ "renamed": true })))
}

/// DELETE /api/setlists/:id
pub async fn delete_setlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    app_state
        .setlists
        .delete(&SetlistId::new(id), auth.user_id())
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/setlists/:id/songs
/// Append a song to the end of the sequence (idempotent)
pub async fn add_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AddSongRequest>,
) -> Result<Json<serde_json::Value>> {
    app_state
        .setlists
        .add_song(
            &SetlistId::new(id),
            &SongId::new(req.song_id),
            auth.user_id(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "added": true })))
}

/// DELETE /api/setlists/:id/songs/:song_id
/// Remove every occurrence of a song from the sequence
pub async fn remove_song(
    Path((id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    app_state
        .setlists
        .remove_song(
            &SetlistId::new(id),
            &SongId::new(song_id),
            auth.user_id(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "removed": true })))
}

/// PUT /api/setlists/:id/songs
/// Replace the whole sequence: this is the reorder commit, one atomic
/// overwrite of the persisted order
pub async fn reorder_setlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>> {
    let song_ids: Vec<SongId> = req.song_ids.into_iter().map(SongId::new).collect();
    app_state
        .setlists
        .reorder(&SetlistId::new(id), &song_ids, auth.user_id())
        .await?;
    Ok(Json(serde_json::json!({ "reordered": true })))
}
