#![allow(dead_code)]

//! Test infrastructure for bk-server API tests

use bk_auth::{Argon2Hasher, HasherConfig, LoginLimitConfig, ResolverConfig, TokenConfig};
use bk_config::{FrontendConfig, ServerConfig};
use bk_db::{SqliteIdentityStore, connect, connect_in_memory};
use bk_server::{AppState, ServiceSettings, build_router};

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-with-32-chars!";
pub const LOGIN_REDIRECT: &str = "http://frontend.test/auth/login";
pub const FAILURE_REDIRECT: &str = "http://frontend.test/auth/failed";

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        token: TokenConfig {
            secret: TEST_SECRET.to_string(),
            ..TokenConfig::default()
        },
        login_limit: LoginLimitConfig {
            max_attempts: 3,
            window_secs: 60,
        },
        frontend: FrontendConfig {
            login_redirect: LOGIN_REDIRECT.to_string(),
            failure_redirect: FAILURE_REDIRECT.to_string(),
        },
        ..ServiceSettings::default()
    }
}

fn test_hasher() -> Arc<Argon2Hasher> {
    Arc::new(
        Argon2Hasher::new(HasherConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher"),
    )
}

/// AppState over an in-memory database
pub async fn create_test_app_state() -> AppState {
    let pool = connect_in_memory()
        .await
        .expect("Failed to create test database");

    AppState::new(
        Arc::new(SqliteIdentityStore::new(pool)),
        test_hasher(),
        test_settings(),
    )
}

/// AppState over a file-backed database for tests with concurrent writers.
/// Keep the TempDir alive for the duration of the test.
pub async fn create_shared_app_state() -> (TempDir, AppState) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = connect(&dir.path().join("identity.db"), 8)
        .await
        .expect("Failed to create shared database");

    let settings = ServiceSettings {
        resolver: ResolverConfig { max_attempts: 10 },
        ..test_settings()
    };
    let state = AppState::new(Arc::new(SqliteIdentityStore::new(pool)), test_hasher(), settings);
    (dir, state)
}

pub fn create_test_app(state: AppState) -> Router {
    build_router(state, &ServerConfig::default())
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Send and decode a JSON response body
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send(app, request).await;
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Register a local account and return `(token, refreshToken)`
pub async fn register(app: &Router, email: &str, password: &str, display_name: &str) -> (String, String) {
    let (status, json) = send_json(
        app,
        json_request(
            "POST",
            "/register",
            json!({ "email": email, "password": password, "displayName": display_name }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", json);

    (
        json["token"].as_str().unwrap().to_string(),
        json["refreshToken"].as_str().unwrap().to_string(),
    )
}

pub fn google_payload(sub: &str, email: &str, picture: &str) -> Value {
    json!({
        "sub": sub,
        "name": "Ana Gomez",
        "email": email,
        "email_verified": true,
        "picture": picture,
    })
}

pub fn facebook_payload(id: &str, email: &str, picture: &str) -> Value {
    json!({
        "id": id,
        "first_name": "Ana",
        "last_name": "Gomez",
        "email": email,
        "picture": { "data": { "url": picture } },
    })
}

/// `Location` header of a redirect response
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Query parameter `name` of `url`, percent-decoded
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| urlencoding::decode(value).unwrap().into_owned())
    })
}
