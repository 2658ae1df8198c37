#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the page API validation and failure contracts.
//!
//! The shared test app points at an unreachable database, so these tests
//! pin down two things: requests rejected by validation never reach the
//! store, and a storage outage surfaces as a 500 envelope — never as a 404.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, get, json_request, send, test_app};

#[tokio::test]
async fn save_page_with_missing_slug_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({ "title": "Home", "blocks": [] }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Missing required fields" })
    );
}

#[tokio::test]
async fn save_page_with_missing_title_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({ "slug": "home", "blocks": [] }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_page_with_missing_blocks_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({ "slug": "home", "title": "Home" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_page_with_empty_slug_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({ "slug": "  ", "title": "Home", "blocks": [] }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_page_with_unknown_block_type_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({
                "slug": "home",
                "title": "Home",
                "blocks": [{ "id": "b1", "type": "carousel", "content": {} }]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid blocks"));
}

#[tokio::test]
async fn save_page_with_duplicate_block_ids_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({
                "slug": "home",
                "title": "Home",
                "blocks": [
                    { "id": "b1", "type": "text", "content": { "text": "one" } },
                    { "id": "b1", "type": "text", "content": { "text": "two" } }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("duplicate block id"));
}

#[tokio::test]
async fn save_page_with_invalid_heading_level_returns_400() {
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({
                "slug": "home",
                "title": "Home",
                "blocks": [
                    { "id": "b1", "type": "heading", "content": { "text": "Hi", "level": 9 } }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_outage_on_list_surfaces_as_500_envelope() {
    let response = send(test_app(), get("/api/pages")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Failed to fetch pages" })
    );
}

#[tokio::test]
async fn storage_outage_on_fetch_is_distinct_from_not_found() {
    let response = send(test_app(), get("/api/pages/home")).await;

    // The database is unreachable, so this must be a 500, not a 404:
    // absence and outage are distinguishable outcomes.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch page");
}

#[tokio::test]
async fn valid_save_reaches_the_store_and_reports_save_failure() {
    // A fully valid body passes validation and hits the unreachable store.
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/pages",
            json!({
                "slug": "home",
                "title": "Home",
                "blocks": [
                    { "id": "b1", "type": "heading", "content": { "text": "Hi", "level": 1 } }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Failed to save page" })
    );
}

#[tokio::test]
async fn document_query_with_invalid_type_returns_400() {
    let response = send(test_app(), get("/api/admin/documents?type=cookie-policy")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid document type");
}
