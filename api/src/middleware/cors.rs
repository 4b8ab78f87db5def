//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients send the refresh cookie cross-origin, so credentials are
//! always supported. Origins come from `CorsConfig`; an empty list or `*`
//! allows any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use todo_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::COOKIE,
        ])
        .max_age(config.max_age)
        .supports_credentials();

    if config.allows_any_origin() {
        log::info!("CORS allows any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}
