//! MySQL repository implementations

mod refresh_token_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use refresh_token_repository_impl::MySqlRefreshTokenRepository;
pub use token_repository_impl::MySqlAccessTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use todo_core::errors::DomainError;
use uuid::Uuid;

/// Wraps a SQLx failure into an internal domain error with context
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "{}", context);
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }
}

/// Parses a CHAR(36) column into a UUID
pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", column, e),
    })
}
