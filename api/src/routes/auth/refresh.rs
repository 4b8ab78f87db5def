use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::handlers::error::handle_domain_error;

use todo_core::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use todo_core::services::PasswordHasher;

use super::{to_cookie, AppState};

/// Handler for POST /todo/app/auth/refresh
///
/// Issues a new access token from the `auth_token` cookie and rotates the
/// refresh token.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Cookie missing, unknown, expired or revoked
/// - 404 Not Found: Owner of the refresh token no longer exists
pub async fn refresh<U, T, R, H>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, R, H>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: AccessTokenRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());

    match state.auth_service.refresh(cookie_header).await {
        Ok(session) => HttpResponse::Ok()
            .cookie(to_cookie(&session.cookie))
            .json(session.response),
        Err(error) => handle_domain_error(error),
    }
}
