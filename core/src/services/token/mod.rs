//! Token service module for JWT management
//!
//! This module handles access token operations:
//! - HS256 JWT generation bound to a username
//! - Verification against signature, expiry, subject and the token store
//! - Atomic revoke-then-issue per user

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
