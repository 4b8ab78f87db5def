//! Application factory
//!
//! Builds the actix-web application from the shared state. The binary and the
//! integration tests both go through [`create_app`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Logger,
    web, App, HttpResponse,
};

use crate::middleware::{auth::AccessTokenVerifier, cors::create_cors, JwtAuth};
use crate::routes::auth::{
    login::login, logout::logout, refresh::refresh, register::register, AppState,
};

use todo_core::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use todo_core::services::PasswordHasher;
use todo_shared::{error_codes, CorsConfig, ErrorResponse};

/// Create and configure the application with all dependencies
pub fn create_app<U, T, R, H>(
    app_state: web::Data<AppState<U, T, R, H>>,
    cors_config: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: AccessTokenRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    // The JWT middleware checks tokens through the same store the service writes to
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.auth_service.token_service();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(json_config())
        .wrap(Logger::default())
        .wrap(create_cors(cors_config))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/todo/app/auth")
                .route("/register", web::post().to(register::<U, T, R, H>))
                .route("/login", web::post().to(login::<U, T, R, H>))
                .route("/refresh", web::post().to(refresh::<U, T, R, H>))
                .route(
                    "/logout/{id}",
                    web::post()
                        .to(logout::<U, T, R, H>)
                        .wrap(JwtAuth::new()),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the same error shape as field validation
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "todo-auth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
