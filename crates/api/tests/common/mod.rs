#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use contactbook_api::auth::credentials::{
    CredentialStore, InMemoryCredentialStore, PgCredentialStore,
};
use contactbook_api::auth::jwt::JwtConfig;
use contactbook_api::auth::revocation::InMemoryRevocationStore;
use contactbook_api::auth::session::SessionService;
use contactbook_api::config::{RedisConfig, ServerConfig};
use contactbook_api::router::build_app_router;
use contactbook_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://postgres@localhost:5432/contactbook_test".to_string(),
        redis: RedisConfig {
            url: "redis://localhost:6379".to_string(),
            pool_size: 1,
            connect_timeout_secs: 1,
            command_timeout_ms: 100,
        },
        jwt: test_jwt(),
    }
}

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiry_mins: 60,
    }
}

/// The router plus a handle on its revocation store for inspection.
pub struct TestApp {
    pub router: Router,
    pub revocations: Arc<InMemoryRevocationStore>,
}

fn build(pool: PgPool, credentials: Arc<dyn CredentialStore>) -> TestApp {
    let config = test_config();
    let revocations = Arc::new(InMemoryRevocationStore::new());
    let sessions = Arc::new(SessionService::new(
        credentials,
        revocations.clone(),
        config.jwt.clone(),
    ));
    let state = AppState { pool, sessions };

    TestApp {
        router: build_app_router(state, &config),
        revocations,
    }
}

/// Full application router backed by in-memory credential and revocation
/// stores. The database pool is lazy and never connects, so routes that
/// reach Postgres (contacts CRUD) must use [`build_test_app_with_pool`].
pub fn build_test_app() -> TestApp {
    let pool = PgPoolOptions::new()
        .connect_lazy(&test_config().database_url)
        .expect("lazy pool URL should parse");
    build(pool, Arc::new(InMemoryCredentialStore::new()))
}

/// Full application router over a real database, with in-memory revocations.
pub fn build_test_app_with_pool(pool: PgPool) -> TestApp {
    build(pool.clone(), Arc::new(PgCredentialStore::new(pool)))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should not fail")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Register `username` and log in, returning the session token.
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let creds = serde_json::json!({ "username": username, "password": password });

    let response = post_json(app, "/users", creds.clone()).await;
    assert_eq!(response.status(), 201, "registration of {username} should succeed");

    let response = post_json(app, "/users/login", creds).await;
    assert_eq!(response.status(), 200, "login of {username} should succeed");
    let json = body_json(response).await;
    json["data"]["token"]
        .as_str()
        .expect("login response must carry a token")
        .to_string()
}
