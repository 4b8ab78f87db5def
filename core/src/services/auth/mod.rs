//! Authentication service module
//!
//! This module composes the token, refresh token and credential components
//! into the account flows:
//! - Registration with unique username and email
//! - Login through a pluggable authenticator
//! - Logout revoking every token of a user
//! - Access token refresh from the refresh cookie

mod authenticator;
mod config;
mod cookie;
mod requests;
mod service;

#[cfg(test)]
mod tests;

pub use authenticator::{Authenticator, PasswordAuthenticator};
pub use config::AuthServiceConfig;
pub use cookie::CookiePolicy;
pub use requests::{
    check_password_strength, LoginRequest, RegistrationRequest, PASSWORD_SPECIAL_CHARS,
    USERNAME_MAX_LENGTH,
};
pub use service::{AuthService, LOGIN_MESSAGE, REGISTRATION_MESSAGE};
