//! Request middleware.

pub mod admin_auth;

pub use admin_auth::{is_authenticated, require_admin};
