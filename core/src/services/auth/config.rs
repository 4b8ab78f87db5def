//! Configuration for the authentication service

use todo_shared::{AuthConfig, CookieConfig};

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Refresh cookie settings
    pub cookie: CookieConfig,
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            cookie: config.cookie.clone(),
        }
    }
}
