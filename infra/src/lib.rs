//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the ToDoList backend,
//! following Clean Architecture principles. It provides MySQL implementations
//! of the repository traits declared in `todo_core`.
//!
//! ## Architecture
//!
//! - **Database**: connection pool, embedded migrations and repositories using SQLx

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{
    DatabasePool, MySqlAccessTokenRepository, MySqlRefreshTokenRepository, MySqlUserRepository,
    PoolStatistics,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
