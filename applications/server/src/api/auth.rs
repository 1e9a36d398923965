/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use cantor_core::types::User;
use cantor_core::DocumentStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// POST /api/auth/register
/// Create an account. New accounts are regular members; admins are
/// promoted from the CLI.
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>> {
    if req.password.len() < 8 {
        return Err(ServerError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user = User::new(req.email.trim().to_lowercase(), req.name.trim());
    let hash = app_state.auth_service.hash_password(&req.password)?;
    app_state.store.create_user(&user, &hash).await?;

    tracing::info!(user = %user.id, "account created");

    let pair = app_state.auth_service.issue_pair(&user)?;
    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = req.email.trim().to_lowercase();

    // Same error for unknown email and bad password
    let (user, hash) = app_state
        .store
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid email or password".to_string()))?;

    if !app_state.auth_service.verify_password(&req.password, &hash)? {
        return Err(ServerError::Auth("Invalid email or password".to_string()));
    }

    let pair = app_state.auth_service.issue_pair(&user)?;
    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user,
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let user = app_state.store.get_user(&user_id).await?;
    let access_token = app_state.auth_service.refresh_access_token(&user)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<User>> {
    let user = app_state.store.get_user(auth.user_id()).await?;
    Ok(Json(user))
}
