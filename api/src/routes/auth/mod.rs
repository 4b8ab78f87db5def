//! Authentication route handlers
//!
//! All routes are mounted under `/todo/app/auth`:
//! - Registration and login, which set the refresh cookie
//! - Access token refresh from the cookie
//! - Logout, which requires a bearer token

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};

use todo_core::domain::value_objects::RefreshCookie;
use todo_core::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use todo_core::services::{AuthService, PasswordHasher};

/// Application state that holds shared services
pub struct AppState<U, T, R, H>
where
    U: UserRepository,
    T: AccessTokenRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, T, R, H>>,
}

/// Builds the `Set-Cookie` value for a refresh cookie description
pub fn to_cookie(cookie: &RefreshCookie) -> Cookie<'static> {
    Cookie::build(cookie.name.clone(), cookie.value.clone())
        .path(cookie.path.clone())
        .max_age(CookieDuration::seconds(cookie.max_age_seconds))
        .http_only(cookie.http_only)
        .secure(cookie.secure)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::services::CookiePolicy;

    #[test]
    fn test_refresh_cookie_header() {
        let cookie = to_cookie(&CookiePolicy::default().build("2f1c0b3e".to_string()));
        let header = cookie.to_string();

        assert!(header.starts_with("auth_token=2f1c0b3e"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Path=/todo/app"));
        assert!(header.contains("Max-Age=1209600"));
        assert!(!header.contains("Secure"));
    }
}
