//! Admin authentication middleware.
//!
//! Verifies the HMAC session cookie and rejects unauthenticated requests to
//! admin-only routes. Returns a generic 401 without revealing which check
//! failed.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::session::{self, ADMIN_COOKIE};
use crate::state::AppState;

/// Check whether a request carries a valid admin session cookie.
pub fn is_authenticated(state: &AppState, headers: &HeaderMap) -> bool {
    session::cookie_value(headers, ADMIN_COOKIE)
        .is_some_and(|token| state.admin().verify_token(&token))
}

/// Middleware that rejects requests without a valid admin session.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_authenticated(&state, request.headers()) {
        next.run(request).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response()
    }
}
