//! Bearer token gate for protected routes.
//!
//! The middleware checks authenticity only: a request either carries a token
//! the configured [`TokenVerifier`] accepts or it is answered with a 401 error
//! envelope. Nothing downstream learns who the caller is.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{Error as ActixError, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::{TokenError, TokenVerifier};

const BEARER_SCHEME: &str = "Bearer";

/// Validate the `Authorization` header in `headers`.
///
/// The header must be exactly `Bearer <token>`, split on a single space.
pub fn authenticate_headers(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
) -> Result<(), TokenError> {
    let value = headers.get(AUTHORIZATION).ok_or_else(TokenError::missing)?;
    let raw = value.to_str().map_err(|_| TokenError::malformed())?;
    if raw.is_empty() {
        return Err(TokenError::missing());
    }
    let mut parts = raw.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => verifier.verify(token),
        _ => Err(TokenError::malformed()),
    }
}

/// Middleware factory requiring a valid bearer token.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use actix_web::{App, web};
/// use users_api::inbound::http::auth::BearerAuth;
/// use users_api::outbound::token::JwtTokenVerifier;
///
/// let verifier = Arc::new(JwtTokenVerifier::new(b"secret", Duration::from_secs(60)));
/// let _app = App::new().service(web::scope("/private").wrap(BearerAuth::new(verifier)));
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl BearerAuth {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate_headers(req.headers(), self.verifier.as_ref()) {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(rejection) => Box::pin(async move {
                debug!(reason = ?rejection, path = req.path(), "bearer authentication failed");
                // Built inside the future so the request trace id is in scope.
                let error = Error::unauthorized(rejection.to_string());
                let response = error.error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
