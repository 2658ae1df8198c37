//! Admin session tokens.
//!
//! Self-contained HMAC-signed cookie tokens for the single shared admin
//! identity. There is no server-side session store: the token carries the
//! username and issue time, and the signature binds both to the configured
//! secret. Logout deletes the cookie client-side; a captured token remains
//! valid until its 24-hour window expires (accepted risk, see DESIGN.md).

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::Config;

type HmacSha256 = Hmac<Sha256>;

/// Name of the admin session cookie.
pub const ADMIN_COOKIE: &str = "admin_token";

/// Token validity period in milliseconds (24 hours).
const TOKEN_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Cookie max-age in seconds, matching the token TTL.
pub const COOKIE_MAX_AGE_SECS: i64 = TOKEN_TTL_MS / 1000;

/// Admin credential store and token signer.
///
/// Read-only after startup; shared across handlers via `AppState`.
#[derive(Clone)]
pub struct AdminAuth {
    username: String,
    password: String,
    key: Vec<u8>,
    cookie_secure: bool,
}

impl AdminAuth {
    /// Build from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            username: config.admin_username.clone(),
            password: config.admin_password.clone(),
            key: config.admin_secret_key.as_bytes().to_vec(),
            cookie_secure: config.cookie_secure,
        }
    }

    /// Verify login credentials in constant time.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        let user_ok: bool = username
            .as_bytes()
            .ct_eq(self.username.as_bytes())
            .into();
        let pass_ok: bool = password
            .as_bytes()
            .ct_eq(self.password.as_bytes())
            .into();
        user_ok && pass_ok
    }

    /// Generate a session token for the configured admin username.
    ///
    /// Format: `base64("{username}:{timestamp_ms}:{hex_hmac}")` where
    /// `hex_hmac = HMAC-SHA256(key, "{username}:{timestamp_ms}")`.
    pub fn generate_token(&self) -> String {
        self.generate_token_at(chrono::Utc::now().timestamp_millis())
    }

    fn generate_token_at(&self, now_ms: i64) -> String {
        let data = format!("{}:{now_ms}", self.username);
        let hash = self.sign(&data);
        BASE64.encode(format!("{data}:{hash}"))
    }

    /// Verify a session token.
    ///
    /// Fails closed on undecodable input, a malformed payload, an expired
    /// timestamp, a signature mismatch, or a username mismatch.
    pub fn verify_token(&self, token: &str) -> bool {
        self.verify_token_at(token, chrono::Utc::now().timestamp_millis())
    }

    fn verify_token_at(&self, token: &str, now_ms: i64) -> bool {
        let Ok(raw) = BASE64.decode(token) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(raw) else {
            return false;
        };

        let mut parts = decoded.splitn(3, ':');
        let (Some(username), Some(timestamp), Some(hash)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(token_ms) = timestamp.parse::<i64>() else {
            return false;
        };
        if now_ms - token_ms > TOKEN_TTL_MS {
            return false;
        }

        let expected = self.sign(&format!("{username}:{timestamp}"));
        let hash_ok: bool = hash.as_bytes().ct_eq(expected.as_bytes()).into();
        let user_ok: bool = username.as_bytes().ct_eq(self.username.as_bytes()).into();
        hash_ok && user_ok
    }

    fn sign(&self, data: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(data.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Build the `Set-Cookie` value for a fresh login.
    pub fn login_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{ADMIN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={COOKIE_MAX_AGE_SECS}"
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Build the `Set-Cookie` value that expires the session cookie.
    pub fn logout_cookie(&self) -> String {
        let mut cookie = format!("{ADMIN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Extract a cookie value from request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(str::to_string)
}
