//! Bearer token authentication middleware.
//!
//! Extracts the `Authorization: Bearer <token>` header, validates the
//! token through the codec, and injects the resulting [`Principal`] into
//! request extensions for downstream handlers. Every failure mode is a
//! 401 with a stable message; the specific token defect is never echoed
//! back.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use am_core::domain::entities::principal::Principal;
use am_core::services::token::TokenService;
use am_shared::types::response::ErrorResponse;

/// Authentication middleware factory
///
/// Holds the process-wide token codec; the codec is read-only after
/// startup and shared across concurrent validations without locking.
pub struct RequireAuth {
    token_service: Arc<TokenService>,
}

impl RequireAuth {
    /// Creates the middleware around a token codec
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}

/// Authentication middleware service
pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = match authenticate(&req, &self.token_service) {
            Ok(principal) => principal,
            Err(response) => {
                let res = req.into_response(response).map_into_right_body();
                return Box::pin(async move { Ok(res) });
            }
        };

        req.extensions_mut().insert(principal);

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
    }
}

/// Run the header checks and token validation for one request
fn authenticate(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<Principal, HttpResponse> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Authorization header required"))?;

    let header = header
        .to_str()
        .map_err(|_| unauthorized("Invalid authorization header format"))?;

    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next();

    let token = match (scheme, token) {
        ("Bearer", Some(token)) if !token.is_empty() && !token.contains(' ') => token,
        _ => return Err(unauthorized("Invalid authorization header format")),
    };

    token_service
        .validate(token)
        .map_err(|_| unauthorized("Invalid or expired token"))
}

/// Build the standard 401 response body
pub(crate) fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new("unauthorized", message))
}

/// Typed accessor for the authenticated principal
///
/// Fails closed: a missing principal means the gate did not run or did
/// not pass, and the request is treated as unauthenticated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                InternalError::from_response(
                    "missing principal",
                    unauthorized("Authentication required"),
                )
                .into()
            });

        ready(result)
    }
}
