#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the REAL application router around a lazily-connected pool that
//! points at an unreachable address. Auth and validation paths never touch
//! the database; handlers that do reach it observe a storage failure, which
//! is exactly the outage behavior the API contract has to distinguish from
//! absence.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use careon_pages::routes;
use careon_pages::{AppState, Config};

pub const ADMIN_USERNAME: &str = "careon-admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Configuration matching what `Config::from_env` would produce in tests.
pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "postgres://postgres@127.0.0.1:1/unreachable".to_string(),
        database_max_connections: 1,
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        admin_secret_key: "integration-test-secret-key-32-bytes!!".to_string(),
        cors_allowed_origins: vec!["*".to_string()],
        cookie_secure: false,
    }
}

/// Build the full application router with an unreachable database.
pub fn test_app() -> Router {
    let config = test_config();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy(&config.database_url)
        .expect("lazy pool construction should not fail");
    let state = AppState::with_pool(&config, pool);
    routes::router(state)
}

/// Send a request through the router.
pub async fn send(app: Router, request: Request<Body>) -> Response<axum::body::Body> {
    app.oneshot(request).await.expect("router call failed")
}

/// Build a GET request.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON request with the given method and body.
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Attach a Cookie header to a request.
pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not valid JSON")
}

/// Pull the session token out of a login response's Set-Cookie header.
pub fn session_cookie(response: &Response<axum::body::Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .expect("empty Set-Cookie header")
        .to_string()
}
