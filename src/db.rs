//! Database connection pool management and startup migrations.

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Run idempotent startup migrations.
///
/// Every statement is `IF NOT EXISTS` / `ON CONFLICT DO NOTHING` so this is
/// safe to run on every boot.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id UUID PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            blocks JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create pages table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS legal_documents (
            id UUID PRIMARY KEY,
            document_type TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            version INTEGER NOT NULL DEFAULT 1,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_by TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create legal_documents table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS legal_documents_history (
            id UUID PRIMARY KEY,
            document_id UUID NOT NULL REFERENCES legal_documents(id) ON DELETE CASCADE,
            document_type TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            version INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            created_by TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create legal_documents_history table")?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS legal_documents_history_document_idx
        ON legal_documents_history (document_id, version DESC)
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create legal_documents_history index")?;

    // Seed one row per document type so the editor always has something to
    // update. Content starts empty until an admin saves the first version.
    sqlx::query(
        r#"
        INSERT INTO legal_documents (id, document_type, title, content)
        VALUES
            (gen_random_uuid(), 'privacy-policy', 'Privacy Policy', ''),
            (gen_random_uuid(), 'terms-of-service', 'Terms of Service', '')
        ON CONFLICT (document_type) DO NOTHING
        "#,
    )
    .execute(pool)
    .await
    .context("failed to seed legal documents")?;

    Ok(())
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
