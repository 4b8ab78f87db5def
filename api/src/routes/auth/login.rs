use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use todo_core::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use todo_core::services::PasswordHasher;

use super::{to_cookie, AppState};

/// Handler for POST /todo/app/auth/login
///
/// Signs a user in with username and password. Every access token issued
/// to the user before this call stops being valid.
///
/// # Response
///
/// ## Success (200 OK)
/// Same body as registration with message "Login successful", plus the
/// `auth_token` refresh cookie.
///
/// ## Errors
/// - 400 Bad Request: Username or password missing
/// - 401 Unauthorized: Invalid username or password
pub async fn login<U, T, R, H>(
    state: web::Data<AppState<U, T, R, H>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: AccessTokenRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.authenticate(request.into()).await {
        Ok(session) => HttpResponse::Ok()
            .cookie(to_cookie(&session.cookie))
            .json(session.response),
        Err(error) => handle_domain_error(error),
    }
}
