//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, bail};

/// Minimum length in bytes for the admin token signing key.
const MIN_SECRET_LEN: usize = 32;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Admin account username.
    pub admin_username: String,

    /// Admin account password.
    pub admin_password: String,

    /// HMAC signing key for admin session tokens (at least 32 bytes).
    pub admin_secret_key: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Whether the admin session cookie carries the `Secure` attribute
    /// (default: false; enable behind TLS).
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The admin credentials have no built-in fallbacks: ADMIN_USERNAME,
    /// ADMIN_PASSWORD, and ADMIN_SECRET_KEY must all be set or startup fails.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let admin_username =
            env::var("ADMIN_USERNAME").context("ADMIN_USERNAME environment variable is required")?;

        let admin_password =
            env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD environment variable is required")?;

        let admin_secret_key = env::var("ADMIN_SECRET_KEY")
            .context("ADMIN_SECRET_KEY environment variable is required")?;

        if admin_secret_key.len() < MIN_SECRET_LEN {
            bail!("ADMIN_SECRET_KEY must be at least {MIN_SECRET_LEN} bytes");
        }

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            admin_username,
            admin_password,
            admin_secret_key,
            cors_allowed_origins,
            cookie_secure,
        })
    }
}
