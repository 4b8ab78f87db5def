//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! checks it against the token store, and injects the caller's context into
//! the request. A token is accepted only while its stored record is not
//! logged out, so logout takes effect immediately.

use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use todo_core::{errors::DomainError, repositories::AccessTokenRepository, services::TokenService};

use crate::handlers::error::{handle_domain_error, unauthorized};

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Owner of the presented token
    pub user_id: Uuid,
    /// Subject claim of the token
    pub username: String,
    /// The raw bearer token
    pub token: String,
}

/// Verifies bearer tokens for the middleware
///
/// Registered in app data as `web::Data<Arc<dyn AccessTokenVerifier>>` so the
/// middleware does not carry the repository type parameters.
#[async_trait]
pub trait AccessTokenVerifier: Send + Sync {
    async fn verify_access_token(&self, token: &str) -> Result<AuthContext, DomainError>;
}

#[async_trait]
impl<T: AccessTokenRepository> AccessTokenVerifier for TokenService<T> {
    async fn verify_access_token(&self, token: &str) -> Result<AuthContext, DomainError> {
        let (claims, record) = self.verify(token).await?;
        Ok(AuthContext {
            user_id: record.user_id,
            username: claims.sub,
            token: token.to_string(),
        })
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    let response = unauthorized("Missing or invalid Authorization header");
                    return Ok(req.into_response(response));
                }
            };

            let verifier = match req.app_data::<web::Data<Arc<dyn AccessTokenVerifier>>>() {
                Some(verifier) => verifier.clone(),
                None => {
                    log::error!("JWT middleware used without a registered token verifier");
                    let response = unauthorized("JWT verification not configured");
                    return Ok(req.into_response(response));
                }
            };

            let auth_context = match verifier.verify_access_token(&token).await {
                Ok(context) => context,
                Err(e) => {
                    log::debug!("Rejected bearer token: {}", e);
                    return Ok(req.into_response(handle_domain_error(e)));
                }
            };

            req.extensions_mut().insert(auth_context);

            service.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[std::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi".to_string()));

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "abc.def.ghi"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);

        let req = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);
    }
}
