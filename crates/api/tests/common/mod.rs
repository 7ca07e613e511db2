//! Shared helpers for API integration tests.
//!
//! Tests run the full production router (middleware stack included) over
//! in-memory storage, so they exercise real HTTP semantics without a
//! database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use novelverse_api::auth::jwt::{generate_access_token, JwtConfig};
use novelverse_api::auth::password::hash_password;
use novelverse_api::config::ServerConfig;
use novelverse_api::router::build_app_router;
use novelverse_api::state::AppState;
use novelverse_db::models::user::{CreateUser, User};
use novelverse_db::{MemStorage, Storage};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router over the given storage backend.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(storage: Arc<dyn Storage>) -> Router {
    let config = test_config();
    let state = AppState {
        storage,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build an app over a fresh in-memory store, returning both.
pub fn test_app() -> (Router, Arc<MemStorage>) {
    let storage = Arc::new(MemStorage::new());
    let app = build_test_app(storage.clone());
    (app, storage)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    bearer: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be valid JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a user directly in storage and mint an access token for them.
pub async fn seed_user(storage: &dyn Storage, username: &str, is_admin: bool) -> (User, String) {
    let password_hash = hash_password("test_password_123!").expect("hashing should succeed");
    let user = storage
        .create_user(CreateUser {
            username: username.to_string(),
            password_hash,
            email: format!("{username}@test.com"),
            avatar: None,
            bio: None,
            is_admin,
        })
        .await
        .expect("user creation should succeed");
    let token = generate_access_token(user.id, user.is_admin, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Create an admin user with a ready-to-use bearer token.
pub async fn seed_admin(storage: &dyn Storage) -> (User, String) {
    seed_user(storage, "admin", true).await
}

/// Register a fresh account through the API and return the auth response JSON.
pub async fn register_user(app: Router, username: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Seed a novel through storage, returning its id.
pub async fn seed_novel(storage: &dyn Storage, title: &str) -> i64 {
    use novelverse_db::models::novel::{CreateNovel, Genre};
    storage
        .create_novel(CreateNovel {
            title: title.to_string(),
            author: "Seed Author".to_string(),
            cover_image: None,
            description: "Seeded for tests.".to_string(),
            genre: Genre::Fantasy,
            tags: vec![],
            is_featured: false,
            is_trending: false,
            created_by: None,
        })
        .await
        .expect("novel creation should succeed")
        .id
}

/// Seed a chapter through storage, returning its id.
pub async fn seed_chapter(storage: &dyn Storage, novel_id: i64, number: i32) -> i64 {
    use novelverse_db::models::chapter::CreateChapter;
    storage
        .create_chapter(CreateChapter {
            novel_id,
            title: format!("Chapter {number}"),
            content: "Seeded content.".to_string(),
            chapter_number: number,
        })
        .await
        .expect("chapter creation should succeed")
        .id
}
