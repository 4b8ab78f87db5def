//! Refresh token service module
//!
//! Opaque refresh tokens are handed to the client in a cookie while only
//! their SHA-256 digest is stored.

mod config;
mod service;


pub use config::RefreshTokenServiceConfig;
pub use service::{hash_token, RefreshTokenService};
