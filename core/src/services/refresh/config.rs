//! Configuration for the refresh token service

use todo_shared::JwtConfig;

use crate::domain::entities::token::REFRESH_TOKEN_EXPIRY_DAYS;

/// Configuration for the refresh token service
#[derive(Debug, Clone)]
pub struct RefreshTokenServiceConfig {
    /// Refresh token lifetime in seconds
    pub expiry_seconds: i64,
}

impl Default for RefreshTokenServiceConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        }
    }
}

impl From<&JwtConfig> for RefreshTokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            expiry_seconds: config.refresh_token_expiry,
        }
    }
}
