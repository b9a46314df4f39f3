//! JWT authentication middleware for protecting booking mutations.
//!
//! The middleware reads the bearer token from the Authorization header,
//! verifies it with the core `TokenService`, and stores the caller's
//! `AuthContext` in the request extensions for handlers to extract.
//! Failures short-circuit with a 401 JSON envelope:
//! `Token not found` when the header is absent, `Invalid token` otherwise.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use rh_core::{domain::entities::Claims, errors::DomainError, RoleSet, TokenError, TokenService};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the `sub` claim
    pub user_id: Uuid,
    /// Roles granted by the token
    pub roles: RoleSet,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates an authentication context from verified claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            roles: claims.roles(),
            jti: claims.jti,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }
}

/// JWT authentication middleware factory
///
/// Without an explicit service the middleware uses the `web::Data<TokenService>`
/// registered on the app.
#[derive(Default)]
pub struct JwtAuth {
    token_service: Option<Arc<TokenService>>,
}

impl JwtAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifies with `token_service` instead of the app data
    pub fn with_service(token_service: Arc<TokenService>) -> Self {
        Self {
            token_service: Some(token_service),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Option<Arc<TokenService>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = self.token_service.clone().or_else(|| {
            req.app_data::<web::Data<TokenService>>()
                .map(|data| data.clone().into_inner())
        });

        Box::pin(async move {
            let token = extract_bearer_token(&req).ok_or(ApiError::MissingToken)?;

            let Some(token_service) = token_service else {
                log::error!("JwtAuth mounted without a TokenService");
                return Err(ApiError::from(DomainError::internal("token verification not configured")).into());
            };

            let auth_context = token_service
                .verify_access_token(&token)
                .and_then(AuthContext::from_claims)
                .map_err(|e| {
                    log::debug!("Rejected bearer token on {}: {}", req.path(), e);
                    ApiError::from(e)
                })?;

            req.extensions_mut().insert(auth_context);
            service.call(req).await
        })
    }
}

/// Extracts the token from `Authorization: Bearer <token>`
///
/// A header without the `Bearer` scheme, or with an empty token, counts as absent.
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
            .ok_or_else(|| ApiError::MissingToken.into());

        ready(result)
    }
}
