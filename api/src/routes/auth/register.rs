use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use todo_core::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use todo_core::services::PasswordHasher;

use super::{to_cookie, AppState};

/// Handler for POST /todo/app/auth/register
///
/// Creates an account and signs the new user in.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "email": "alice@example.com",
///     "password": "Secret#123"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
///     "username": "alice",
///     "jwt": "eyJ...",
///     "message": "Registration Successful",
///     "status": "OK"
/// }
/// ```
/// The refresh token is set as the `auth_token` cookie.
///
/// ## Errors
/// - 400 Bad Request: Field validation failed
/// - 409 Conflict: Username or email already in use
pub async fn register<U, T, R, H>(
    state: web::Data<AppState<U, T, R, H>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: AccessTokenRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        log::debug!("Registration request rejected: {}", errors);
        return handle_validation_errors(errors);
    }

    match state.auth_service.register(request.into()).await {
        Ok(session) => HttpResponse::Ok()
            .cookie(to_cookie(&session.cookie))
            .json(session.response),
        Err(error) => handle_domain_error(error),
    }
}
