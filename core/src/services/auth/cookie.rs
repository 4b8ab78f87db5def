//! Refresh cookie construction and parsing

use todo_shared::CookieConfig;

use crate::domain::value_objects::RefreshCookie;
use crate::errors::AuthError;

/// Builds the refresh cookie and reads it back from a `Cookie` header
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    config: CookieConfig,
}

impl CookiePolicy {
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    /// Cookie name, `auth_token` by default
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Describes the cookie carrying `value`
    pub fn build(&self, value: String) -> RefreshCookie {
        RefreshCookie {
            name: self.config.name.clone(),
            value,
            path: self.config.path.clone(),
            max_age_seconds: self.config.max_age_seconds,
            http_only: self.config.http_only,
            secure: self.config.secure,
        }
    }

    /// Extracts the refresh token from a raw `Cookie` header
    ///
    /// The header must start with `<name>=`. The value runs up to the first
    /// `;`. A missing header, another leading cookie or an empty value is
    /// reported as `AuthError::ExpiredCookie`.
    pub fn extract<'a>(&self, header: Option<&'a str>) -> Result<&'a str, AuthError> {
        let header = header.ok_or(AuthError::ExpiredCookie)?;
        let rest = header
            .strip_prefix(self.config.header_prefix().as_str())
            .ok_or(AuthError::ExpiredCookie)?;

        let value = rest.split(';').next().unwrap_or_default().trim();
        if value.is_empty() {
            return Err(AuthError::ExpiredCookie);
        }

        Ok(value)
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::new(CookieConfig::default())
    }
}
