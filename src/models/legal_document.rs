//! Legal document model with version history.
//!
//! One active row per document type; every update snapshots the previous
//! version into a history table so any version can be restored.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// The document types the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    PrivacyPolicy,
    TermsOfService,
}

impl DocumentType {
    /// Machine name, as stored in the document_type column.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::PrivacyPolicy => "privacy-policy",
            DocumentType::TermsOfService => "terms-of-service",
        }
    }

    /// Parse a machine name; `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "privacy-policy" => Some(DocumentType::PrivacyPolicy),
            "terms-of-service" => Some(DocumentType::TermsOfService),
            _ => None,
        }
    }
}

/// Current legal document record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LegalDocument {
    pub id: Uuid,
    pub document_type: String,
    pub title: String,
    pub content: String,
    pub version: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

/// Snapshot of a prior document version.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LegalDocumentHistory {
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_type: String,
    pub title: String,
    pub content: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

impl LegalDocument {
    /// Fetch the active document for a type.
    pub async fn get_active(pool: &PgPool, document_type: DocumentType) -> Result<Option<Self>> {
        let document = sqlx::query_as::<_, LegalDocument>(
            r#"
            SELECT id, document_type, title, content, version, is_active,
                   created_at, updated_at, updated_by
            FROM legal_documents
            WHERE document_type = $1 AND is_active
            "#,
        )
        .bind(document_type.as_str())
        .fetch_optional(pool)
        .await
        .context("failed to fetch legal document")?;

        Ok(document)
    }

    /// Update a document's content, snapshotting the outgoing version.
    ///
    /// The snapshot insert and the update run in one transaction: either the
    /// history row and the new version both land, or neither does. Returns
    /// `Ok(None)` when no active document exists for the type.
    pub async fn update_content(
        pool: &PgPool,
        document_type: DocumentType,
        content: &str,
        updated_by: &str,
    ) -> Result<Option<Self>> {
        let mut tx = pool.begin().await.context("failed to begin transaction")?;

        let current = sqlx::query_as::<_, LegalDocument>(
            r#"
            SELECT id, document_type, title, content, version, is_active,
                   created_at, updated_at, updated_by
            FROM legal_documents
            WHERE document_type = $1 AND is_active
            FOR UPDATE
            "#,
        )
        .bind(document_type.as_str())
        .fetch_optional(&mut *tx)
        .await
        .context("failed to lock legal document")?;

        let Some(current) = current else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO legal_documents_history
                (id, document_id, document_type, title, content, version, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(current.id)
        .bind(&current.document_type)
        .bind(&current.title)
        .bind(&current.content)
        .bind(current.version)
        .bind(current.updated_by.as_deref())
        .execute(&mut *tx)
        .await
        .context("failed to snapshot legal document")?;

        let updated = sqlx::query_as::<_, LegalDocument>(
            r#"
            UPDATE legal_documents
            SET content = $1,
                version = version + 1,
                updated_by = $2,
                updated_at = now()
            WHERE id = $3
            RETURNING id, document_type, title, content, version, is_active,
                      created_at, updated_at, updated_by
            "#,
        )
        .bind(content)
        .bind(updated_by)
        .bind(current.id)
        .fetch_one(&mut *tx)
        .await
        .context("failed to update legal document")?;

        tx.commit().await.context("failed to commit transaction")?;

        Ok(Some(updated))
    }

    /// List a document's version history, newest first.
    pub async fn history(
        pool: &PgPool,
        document_type: DocumentType,
    ) -> Result<Vec<LegalDocumentHistory>> {
        let history = sqlx::query_as::<_, LegalDocumentHistory>(
            r#"
            SELECT h.id, h.document_id, h.document_type, h.title, h.content,
                   h.version, h.created_at, h.created_by
            FROM legal_documents_history h
            JOIN legal_documents d ON d.id = h.document_id
            WHERE d.document_type = $1
            ORDER BY h.version DESC
            "#,
        )
        .bind(document_type.as_str())
        .fetch_all(pool)
        .await
        .context("failed to fetch legal document history")?;

        Ok(history)
    }

    /// Restore a prior version's content as a new version.
    ///
    /// Returns `Ok(None)` when the history row does not exist or belongs to
    /// a different document type.
    pub async fn restore_version(
        pool: &PgPool,
        document_type: DocumentType,
        history_id: Uuid,
        restored_by: &str,
    ) -> Result<Option<Self>> {
        let snapshot = sqlx::query_as::<_, LegalDocumentHistory>(
            r#"
            SELECT id, document_id, document_type, title, content, version,
                   created_at, created_by
            FROM legal_documents_history
            WHERE id = $1 AND document_type = $2
            "#,
        )
        .bind(history_id)
        .bind(document_type.as_str())
        .fetch_optional(pool)
        .await
        .context("failed to fetch history version")?;

        let Some(snapshot) = snapshot else {
            return Ok(None);
        };

        Self::update_content(pool, document_type, &snapshot.content, restored_by).await
    }
}
