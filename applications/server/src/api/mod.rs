/// API route handlers
pub mod auth;
pub mod health;
pub mod setlists;
pub mod songs;

use crate::{middleware, services::AuthService, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
pub fn create_router(app_state: AppState, auth_service: Arc<AuthService>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        // Song library
        .route("/songs", get(songs::list_songs))
        .route("/songs", post(songs::create_song))
        .route("/songs/:id", get(songs::get_song))
        .route("/songs/:id", put(songs::update_song))
        .route("/songs/:id", delete(songs::delete_song))
        // Setlists
        .route("/setlists", get(setlists::list_setlists))
        .route("/setlists", post(setlists::create_setlist))
        .route("/setlists/:id", get(setlists::get_setlist))
        .route("/setlists/:id", put(setlists::rename_setlist))
        .route("/setlists/:id", delete(setlists::delete_setlist))
        .route("/setlists/:id/songs", post(setlists::add_song))
        .route("/setlists/:id/songs", put(setlists::reorder_setlist))
        .route(
            "/setlists/:id/songs/:song_id",
            delete(setlists::remove_song),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
