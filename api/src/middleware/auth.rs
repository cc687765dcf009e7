//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization
//! header, verifies it, and injects the authenticated user context into
//! the request. Requests that fail extraction or verification are
//! short-circuited with a 401 response before they reach any handler;
//! requests that pass continue with an [`AuthContext`] attached for
//! downstream authorization checks.

use std::{
    future::{ready, Ready},
    sync::Arc,
};

use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use signet_core::domain::entities::token::Claims;
use signet_core::errors::TokenError;
use signet_core::services::token::{bearer_token, TokenService, TokenServiceConfig};
use signet_shared::config::AuthConfig;
use signet_shared::errors::{error_codes, ErrorResponse};

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject identity extracted from the JWT claims
    pub subject: String,
    /// Role names granted to the subject, in grant order
    pub roles: Vec<String>,
}

impl AuthContext {
    /// Creates a new authentication context from verified JWT claims
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            roles: claims.role,
        }
    }

    /// Convenience helper for downstream authorization checks
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|value| value == role)
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    tokens: Arc<TokenService>,
}

impl JwtAuth {
    /// Creates the middleware around an existing token service
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Builds the token service from environment configuration
    pub fn from_env() -> Self {
        let config = AuthConfig::from_env();
        if config.jwt.is_using_default_secret() {
            warn!("JWT_SECRET is not set, signing with the development secret");
        }
        Self::new(Arc::new(TokenService::new(TokenServiceConfig::from(
            &config.jwt,
        ))))
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service,
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Extract token from Authorization header
        let token = match extract_bearer_token(&req) {
            Some(token) => token,
            None => {
                debug!("rejected request without a bearer credential");
                return reject(
                    req,
                    error_codes::UNAUTHORIZED,
                    "Missing or invalid Authorization header",
                );
            }
        };

        if let Err(error) = self.tokens.validate_token(&token) {
            debug!(%error, "rejected bearer token");
            return reject_token(req, &error);
        }

        // A token that just validated still parses here; the fallback
        // covers expiry between the two calls.
        let auth_context = match self.tokens.extract_claims(&token) {
            Some(claims) => AuthContext::from_claims(claims),
            None => return reject_token(req, &TokenError::TokenExpired),
        };

        // Inject auth context into request extensions
        req.extensions_mut().insert(auth_context);

        // Continue with the request
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Extracts the bearer credential from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok();
    bearer_token(header).map(str::to_owned)
}

/// Short-circuits the request with a 401 carrying the standard error body
fn reject<B>(
    req: ServiceRequest,
    code: &str,
    message: &str,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B, BoxBody>>, Error>> {
    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(code, message));
    Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
}

/// Maps a token failure onto the matching rejection code
fn reject_token<B>(
    req: ServiceRequest,
    error: &TokenError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B, BoxBody>>, Error>> {
    let code = match error {
        TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
        _ => error_codes::TOKEN_INVALID,
    };
    reject(req, code, &error.to_string())
}

/// Builds the 401 rejection used by the extractors
fn unauthorized(code: &str, message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(code, message));
    InternalError::from_response(message.to_string(), response).into()
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
            .ok_or_else(|| unauthorized(error_codes::UNAUTHORIZED, "Authentication required"));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
