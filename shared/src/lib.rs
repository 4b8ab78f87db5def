//! Shared configuration and common types for the ToDoList server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error response body returned by every endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CookieConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LoggingConfig, ServerConfig, MIN_SIGNING_KEY_BYTES,
};
pub use errors::{error_codes, ErrorResponse};
