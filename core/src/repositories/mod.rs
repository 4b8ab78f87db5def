pub mod refresh_token;
pub mod token;
pub mod user;

pub use refresh_token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
pub use token::{AccessTokenRepository, InMemoryAccessTokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
