/// API integration tests
/// Complete HTTP request/response cycles against a real database
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use cantor_core::types::{Song, User};
use cantor_core::DocumentStore;
use cantor_server::{api::create_router, services::AuthService, state::AppState};
use cantor_storage::SqliteStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: Router,
    store: Arc<SqliteStore>,
    auth_service: Arc<AuthService>,
    _dir: TempDir,
}

async fn create_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("cantor_test.db").display());

    let pool = cantor_storage::create_pool(&url).await.unwrap();
    cantor_storage::run_migrations(&pool).await.unwrap();
    let store = Arc::new(SqliteStore::new(pool));

    let auth_service = Arc::new(AuthService::new("test-secret-key".to_string(), 1, 1));
    let app_state = AppState::new(Arc::clone(&store), Arc::clone(&auth_service));
    let app = create_router(app_state, Arc::clone(&auth_service));

    TestApp {
        app,
        store,
        auth_service,
        _dir: dir,
    }
}

impl TestApp {
    /// Create a user directly and return their bearer token
    async fn signed_in_user(&self, email: &str, admin: bool) -> (User, String) {
        let mut user = User::new(email, "Test User");
        user.is_admin = admin;
        let hash = self.auth_service.hash_password("password123").unwrap();
        self.store.create_user(&user, &hash).await.unwrap();

        let pair = self.auth_service.issue_pair(&user).unwrap();
        (user, pair.access_token)
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = create_test_app().await;
    let (status, body) = app.request("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn songs_require_authentication() {
    let app = create_test_app().await;
    let (status, _) = app.request("GET", "/api/songs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_then_login() {
    let app = create_test_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "worship@example.com",
                "name": "Worship Leader",
                "password": "password123"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email": "worship@example.com",
                "password": "password123"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "worship@example.com");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = create_test_app().await;
    app.signed_in_user("a@example.com", false).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "a@example.com", "password": "nope-nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = create_test_app().await;
    app.signed_in_user("dup@example.com", false).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "dup@example.com",
                "name": "Dup",
                "password": "password123"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn only_admins_write_the_song_library() {
    let app = create_test_app().await;
    let (_, member_token) = app.signed_in_user("member@example.com", false).await;
    let (_, admin_token) = app.signed_in_user("admin@example.com", true).await;

    let song_body = json!({
        "title": "Amazing Grace",
        "artist": "John Newton",
        "lyrics": "Amazing grace\nHow sweet the sound"
    });

    let (status, _) = app
        .request("POST", "/api/songs", Some(&member_token), Some(song_body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request("POST", "/api/songs", Some(&admin_token), Some(song_body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Amazing Grace");

    // Members can still read the library
    let (status, body) = app
        .request("GET", "/api/songs", Some(&member_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn setlist_lifecycle_with_reorder() {
    let app = create_test_app().await;
    let (admin, token) = app.signed_in_user("leader@example.com", true).await;

    // Library songs
    let mut song_ids = Vec::new();
    for title in ["First", "Second", "Third"] {
        let song = Song::new(title, "Artist", "la\nla");
        app.store.insert_song(&song, &admin.id).await.unwrap();
        song_ids.push(song.id.as_str().to_string());
    }

    // Create a setlist
    let (status, body) = app
        .request(
            "POST",
            "/api/setlists",
            Some(&token),
            Some(json!({ "name": "Sunday Service", "service_date": "2025-06-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let setlist_id = body["id"].as_str().unwrap().to_string();

    // Append songs in order
    for id in &song_ids {
        let (status, _) = app
            .request(
                "POST",
                &format!("/api/setlists/{setlist_id}/songs"),
                Some(&token),
                Some(json!({ "song_id": id })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Move the last song to the front
    let reordered = vec![
        song_ids[2].clone(),
        song_ids[0].clone(),
        song_ids[1].clone(),
    ];
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/setlists/{setlist_id}/songs"),
            Some(&token),
            Some(json!({ "song_ids": reordered })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Resolved detail reflects the new order
    let (status, body) = app
        .request(
            "GET",
            &format!("/api/setlists/{setlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third", "First", "Second"]);

    // Remove one song
    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/setlists/{setlist_id}/songs/{}", song_ids[0]),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .request(
            "GET",
            &format!("/api/setlists/{setlist_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(body["songs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn setlists_are_private() {
    let app = create_test_app().await;
    let (_, owner_token) = app.signed_in_user("owner@example.com", false).await;
    let (_, other_token) = app.signed_in_user("other@example.com", false).await;

    let (_, body) = app
        .request(
            "POST",
            "/api/setlists",
            Some(&owner_token),
            Some(json!({ "name": "Mine", "service_date": "2025-06-01" })),
        )
        .await;
    let setlist_id = body["id"].as_str().unwrap().to_string();

    // Invisible to another user
    let (status, _) = app
        .request(
            "GET",
            &format!("/api/setlists/{setlist_id}"),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .request("GET", "/api/setlists", Some(&other_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
