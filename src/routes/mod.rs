//! HTTP route handlers.

pub mod admin;
pub mod document;
pub mod health;
pub mod page;

use axum::Router;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(page::router(state.clone()))
        .merge(admin::router())
        .merge(document::router())
        .merge(health::router())
        .with_state(state)
}
