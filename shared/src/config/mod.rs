//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and refresh cookie configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, CookieConfig, JwtConfig, MIN_SIGNING_KEY_BYTES};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Values missing from the environment fall back to their defaults.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut auth = AuthConfig::from_env();
        if environment.is_production() && std::env::var("AUTH_COOKIE_SECURE").is_err() {
            auth.cookie.secure = true;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth,
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Problems that make this configuration unfit to run with
    pub fn startup_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            problems.push("JWT_SECRET must be set in production".to_string());
        }
        if !self.auth.jwt.has_sufficient_key_length() {
            problems.push(format!(
                "JWT_SECRET must decode to at least {} bytes",
                auth::MIN_SIGNING_KEY_BYTES
            ));
        }
        if self.auth.cookie.max_age_seconds <= 0 {
            problems.push("AUTH_COOKIE_MAX_AGE must be positive".to_string());
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_problems() {
        let config = AppConfig::default();
        assert!(config.startup_problems().is_empty());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;

        let problems = config.startup_problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("JWT_SECRET"));
    }

    #[test]
    fn test_short_secret_is_a_problem() {
        for secret in ["", "c2hvcnQ"] {
            let mut config = AppConfig::default();
            config.auth.jwt = JwtConfig::new(secret);

            let problems = config.startup_problems();
            assert_eq!(problems.len(), 1, "secret {:?}", secret);
            assert!(problems[0].contains("at least 32 bytes"));
        }
    }
}
