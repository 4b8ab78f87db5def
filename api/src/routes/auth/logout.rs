use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use todo_core::errors::AuthError;
use todo_core::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use todo_core::services::PasswordHasher;

use super::AppState;

/// Handler for POST /todo/app/auth/logout/{id}
///
/// Logs a user out by revoking all of their access and refresh tokens.
/// Requires a Bearer token belonging to the same user.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully",
///     "revoked_tokens": 1
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or revoked access token
/// - 403 Forbidden: Path id is not the authenticated user
/// - 404 Not Found: User does not exist
pub async fn logout<U, T, R, H>(
    state: web::Data<AppState<U, T, R, H>>,
    path: web::Path<Uuid>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: AccessTokenRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let user_id = path.into_inner();
    if auth.user_id != user_id {
        log::warn!(
            "User {} attempted to log out user {}",
            auth.user_id,
            user_id
        );
        return handle_domain_error(AuthError::InsufficientPermissions.into());
    }

    match state.auth_service.logout(user_id).await {
        Ok(revoked_tokens) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
            revoked_tokens,
        }),
        Err(error) => handle_domain_error(error),
    }
}
