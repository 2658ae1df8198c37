//! Page CRUD route handlers.
//!
//! JSON API over the page store. Responses use a `{success, data?, error?}`
//! envelope; the same POST serves create and update, keyed by slug.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::content::{self, Block};
use crate::middleware::require_admin;
use crate::models::Page;
use crate::state::AppState;

/// Request body for saving a page.
///
/// Fields are optional so a missing field maps to a 400 with the API's
/// error envelope instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SavePageRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub blocks: Option<Value>,
}

/// Create the page router.
pub fn router(state: AppState) -> Router<AppState> {
    let admin_only = Router::new()
        .route("/api/admin/pages/{id}", delete(delete_page))
        .route("/api/pages/repair", post(repair_pages))
        .route_layer(axum::middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/api/pages", get(list_pages).post(save_page))
        .route("/api/pages/{slug}", get(get_page))
        .merge(admin_only)
}

/// List all pages, most recently edited first.
///
/// GET /api/pages
async fn list_pages(State(state): State<AppState>) -> Response {
    match Page::list_all(state.db()).await {
        Ok(pages) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": pages })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list pages");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to fetch pages" })),
            )
                .into_response()
        }
    }
}

/// Fetch a single page by slug.
///
/// GET /api/pages/{slug} — absence is a 404, a storage failure a 500.
async fn get_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match Page::find_by_slug(state.db(), &slug).await {
        Ok(Some(page)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": page })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Page not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "failed to fetch page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to fetch page" })),
            )
                .into_response()
        }
    }
}

/// Create or update a page, keyed on slug.
///
/// POST /api/pages — idempotent per slug: repeating the same body converges
/// to one row with that slug.
async fn save_page(State(state): State<AppState>, Json(body): Json<SavePageRequest>) -> Response {
    let (Some(slug), Some(title), Some(blocks)) = (body.slug, body.title, body.blocks) else {
        return missing_fields();
    };
    if slug.trim().is_empty() || title.trim().is_empty() {
        return missing_fields();
    }

    let mut blocks: Vec<Block> = match serde_json::from_value(blocks) {
        Ok(blocks) => blocks,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": format!("Invalid blocks: {e}") })),
            )
                .into_response();
        }
    };

    let errors = content::validate_blocks(&blocks);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": errors.join("; ") })),
        )
            .into_response();
    }

    content::sanitize_blocks(&mut blocks);

    match Page::upsert(state.db(), &slug, &title, &blocks).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "failed to save page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to save page" })),
            )
                .into_response()
        }
    }
}

fn missing_fields() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": "Missing required fields" })),
    )
        .into_response()
}

/// Delete a page by id (admin only).
///
/// DELETE /api/admin/pages/{id}
async fn delete_page(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match Page::delete_by_id(state.db(), id).await {
        Ok(true) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Page not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, %id, "failed to delete page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to delete page" })),
            )
                .into_response()
        }
    }
}

/// Normalize legacy block payloads across all pages (admin only).
///
/// POST /api/pages/repair — drops stored blocks that no longer parse under
/// the typed schema and strips fields the schema does not know about. Pages
/// that are already well-formed are left untouched.
async fn repair_pages(State(state): State<AppState>) -> Response {
    let pages = match Page::list_all_raw(state.db()).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch pages for repair");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to fetch pages" })),
            )
                .into_response();
        }
    };

    let mut repaired = 0;
    for page in &pages {
        let Some(fixed) = repair_blocks(&page.blocks) else {
            continue;
        };
        match Page::replace_blocks(state.db(), page.id, &fixed).await {
            Ok(()) => {
                tracing::info!(slug = %page.slug, "repaired page blocks");
                repaired += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, slug = %page.slug, "failed to repair page");
            }
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "repaired": repaired })),
    )
        .into_response()
}

/// Rebuild a stored block array under the typed schema.
///
/// Returns `None` when the stored value is already well-formed, otherwise
/// the normalized replacement: entries that fail to parse are dropped, and
/// parseable entries are re-serialized (shedding unknown fields).
fn repair_blocks(stored: &Value) -> Option<Value> {
    let Some(items) = stored.as_array() else {
        // Not even an array — reset to an empty page.
        return Some(json!([]));
    };

    let mut changed = false;
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        match serde_json::from_value::<Block>(item.clone()) {
            Ok(block) => {
                let normalized = match serde_json::to_value(&block) {
                    Ok(value) => value,
                    Err(_) => item.clone(),
                };
                if &normalized != item {
                    changed = true;
                }
                kept.push(normalized);
            }
            Err(_) => {
                changed = true;
            }
        }
    }

    if changed { Some(Value::Array(kept)) } else { None }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn repair_leaves_valid_blocks_alone() {
        let stored = json!([
            { "id": "b1", "type": "heading", "content": { "text": "Hi", "level": 1 } },
            { "id": "b2", "type": "spacer", "content": { "height": 50 } }
        ]);
        assert_eq!(repair_blocks(&stored), None);
    }

    #[test]
    fn repair_drops_malformed_entries() {
        let stored = json!([
            { "id": "b1", "type": "heading", "content": { "text": "Hi", "level": 1 } },
            { "id": "b2" },
            { "type": "mystery", "content": {} }
        ]);
        let fixed = repair_blocks(&stored).unwrap();
        let items = fixed.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "b1");
    }

    #[test]
    fn repair_resets_non_array_blocks() {
        let stored = json!({ "oops": true });
        assert_eq!(repair_blocks(&stored), Some(json!([])));
    }

    #[test]
    fn repair_strips_unknown_fields() {
        let stored = json!([
            {
                "id": "b1",
                "type": "text",
                "content": { "text": "hello" },
                "legacy_flag": true
            }
        ]);
        let fixed = repair_blocks(&stored).unwrap();
        assert!(fixed.as_array().unwrap()[0].get("legacy_flag").is_none());
    }
}
