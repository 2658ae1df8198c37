//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::Config;
use crate::db;
use crate::session::AdminAuth;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Admin credential store and token signer (read-only after startup).
    admin: AdminAuth,
}

impl AppState {
    /// Create new application state: connect to the database and run
    /// startup migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        db::run_migrations(&db)
            .await
            .context("failed to run migrations")?;

        Ok(Self::with_pool(config, db))
    }

    /// Create application state around an existing pool.
    ///
    /// Skips migrations; used by integration tests that manage their own
    /// database lifecycle.
    pub fn with_pool(config: &Config, db: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                admin: AdminAuth::new(config),
            }),
        }
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the admin auth service.
    pub fn admin(&self) -> &AdminAuth {
        &self.inner.admin
    }

    /// Check if PostgreSQL is healthy.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
