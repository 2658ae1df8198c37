//! Page model for the page-builder store.
//!
//! A page is a slug-keyed, ordered collection of content blocks. This module
//! is the sole authority for page persistence: route handlers never touch
//! the pages table directly.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::content::Block;

/// Page record.
///
/// Absence is signaled as `Ok(None)` and storage failures as `Err`, so
/// callers can map the two to distinct HTTP outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Page {
    /// Unique identifier (UUIDv7), store-assigned.
    pub id: Uuid,

    /// Unique human-readable key, the upsert conflict target.
    pub slug: String,

    /// Display name.
    pub title: String,

    /// Ordered block sequence (JSONB column; order is rendering order).
    pub blocks: Json<Vec<Block>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page row with blocks left as raw JSON, for repair passes over data
/// stored before the typed block schema existed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RawPage {
    pub id: Uuid,
    pub slug: String,
    pub blocks: serde_json::Value,
}

impl Page {
    /// Find a page by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>> {
        let page = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, slug, title, blocks, created_at, updated_at
            FROM pages
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("failed to fetch page by slug")?;

        Ok(page)
    }

    /// List all pages, most recently edited first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let pages = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, slug, title, blocks, created_at, updated_at
            FROM pages
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("failed to list pages")?;

        Ok(pages)
    }

    /// Insert or replace a page, keyed on slug.
    ///
    /// A save with an existing slug replaces title and blocks and refreshes
    /// `updated_at` rather than creating a duplicate. The operation is a
    /// single atomic statement and is idempotent per slug.
    pub async fn upsert(pool: &PgPool, slug: &str, title: &str, blocks: &[Block]) -> Result<Self> {
        let id = Uuid::now_v7();

        let page = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (id, slug, title, blocks)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE
                SET title = EXCLUDED.title,
                    blocks = EXCLUDED.blocks,
                    updated_at = now()
            RETURNING id, slug, title, blocks, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(slug)
        .bind(title)
        .bind(Json(blocks))
        .fetch_one(pool)
        .await
        .context("failed to upsert page")?;

        Ok(page)
    }

    /// Delete a page by id.
    pub async fn delete_by_id(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete page")?;

        Ok(result.rows_affected() > 0)
    }

    /// List all pages with blocks as raw JSON.
    pub async fn list_all_raw(pool: &PgPool) -> Result<Vec<RawPage>> {
        let pages = sqlx::query_as::<_, RawPage>("SELECT id, slug, blocks FROM pages")
            .fetch_all(pool)
            .await
            .context("failed to list raw pages")?;

        Ok(pages)
    }

    /// Replace a page's block array without touching title or slug.
    ///
    /// Used by the repair pass; refreshes `updated_at` like any other write.
    pub async fn replace_blocks(pool: &PgPool, id: Uuid, blocks: &serde_json::Value) -> Result<()> {
        sqlx::query("UPDATE pages SET blocks = $1, updated_at = now() WHERE id = $2")
            .bind(blocks)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to replace page blocks")?;

        Ok(())
    }
}
