//! Legal document routes (view, edit, history, restore).
//!
//! Reading a document is public; every write requires the admin session.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::is_authenticated;
use crate::models::{DocumentType, LegalDocument};
use crate::state::AppState;

/// Query parameters for fetching a document.
#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    #[serde(rename = "type")]
    pub document_type: String,
    #[serde(default)]
    pub history: Option<String>,
}

/// Request body for updating a document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub document_type: String,
    pub content: Option<String>,
}

/// Request body for restoring a prior version.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreDocumentRequest {
    pub document_type: String,
    pub history_id: Uuid,
}

/// Create the legal document router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/documents",
            get(get_document).put(update_document),
        )
        .route("/api/admin/documents/restore", post(restore_document))
}

fn parse_type(raw: &str) -> AppResult<DocumentType> {
    DocumentType::parse(raw).ok_or_else(|| AppError::BadRequest("Invalid document type".into()))
}

/// Fetch the active document for a type, optionally with its history.
///
/// GET /api/admin/documents?type=privacy-policy&history=true
async fn get_document(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> AppResult<Response> {
    let document_type = parse_type(&query.document_type)?;

    let document = LegalDocument::get_active(state.db(), document_type)
        .await?
        .ok_or(AppError::NotFound)?;

    if query.history.as_deref() == Some("true") {
        let history = LegalDocument::history(state.db(), document_type).await?;
        return Ok(Json(json!({ "document": document, "history": history })).into_response());
    }

    Ok(Json(document).into_response())
}

/// Update a document's content (admin only).
///
/// PUT /api/admin/documents
async fn update_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateDocumentRequest>,
) -> AppResult<Response> {
    if !is_authenticated(&state, &headers) {
        return Err(AppError::Unauthorized);
    }

    let document_type = parse_type(&body.document_type)?;

    let content = match body.content.as_deref() {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(AppError::BadRequest("Content is required".into())),
    };

    let document = LegalDocument::update_content(state.db(), document_type, content, "admin")
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({
        "success": true,
        "document": document,
        "message": "Document updated"
    }))
    .into_response())
}

/// Restore a prior version of a document (admin only).
///
/// POST /api/admin/documents/restore
async fn restore_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RestoreDocumentRequest>,
) -> AppResult<Response> {
    if !is_authenticated(&state, &headers) {
        return Err(AppError::Unauthorized);
    }

    let document_type = parse_type(&body.document_type)?;

    let document =
        LegalDocument::restore_version(state.db(), document_type, body.history_id, "admin")
            .await?
            .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "success": true, "document": document })).into_response())
}
