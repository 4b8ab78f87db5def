//! Business services containing domain logic and use cases.

pub mod auth;
pub mod password;
pub mod refresh;
pub mod token;

// Re-export commonly used types
pub use auth::{
    AuthService, AuthServiceConfig, Authenticator, CookiePolicy, LoginRequest,
    PasswordAuthenticator, RegistrationRequest,
};
pub use password::{hash_blocking, verify_blocking, BcryptPasswordHasher, PasswordHasher};
pub use refresh::{RefreshTokenService, RefreshTokenServiceConfig};
pub use token::{TokenService, TokenServiceConfig};
