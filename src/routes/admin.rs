//! Admin authentication routes (login, logout, check-auth).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::middleware::is_authenticated;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Create the admin auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .route("/api/admin/check-auth", get(check_auth))
}

/// Admin login handler.
///
/// POST /api/admin/login — on success, sets the HMAC session cookie.
/// The error message does not reveal which credential was wrong.
async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let admin = state.admin();

    if !admin.verify_credentials(&body.username, &body.password) {
        info!("failed admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid username or password" })),
        )
            .into_response();
    }

    let token = admin.generate_token();
    info!("admin login");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, admin.login_cookie(&token))],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Admin logout handler.
///
/// POST /api/admin/logout — expires the cookie client-side. The token
/// itself stays valid until its window ends; there is no revocation list.
async fn logout(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, state.admin().logout_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Session check handler.
///
/// GET /api/admin/check-auth
async fn check_auth(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if is_authenticated(&state, &headers) {
        (StatusCode::OK, Json(json!({ "authenticated": true }))).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false })),
        )
            .into_response()
    }
}
