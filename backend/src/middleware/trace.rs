//! Request tracing: one UUID per request, echoed back and logged.
//!
//! The identifier lives in task-local storage (see [`TraceId`]) for the whole
//! handler future, so domain errors built anywhere downstream pick it up.
//! Work moved onto a spawned task must be wrapped in [`TraceId::scope`]
//! explicitly; tokio does not inherit task-locals.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info, warn};

use crate::domain::TraceId;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Middleware factory: scopes a fresh [`TraceId`] around every request,
/// stamps it on the response, and writes an access log line.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

/// What the access line needs to know about a request once it finishes.
struct AccessLog {
    trace_id: TraceId,
    method: Method,
    path: String,
    started: Instant,
}

impl AccessLog {
    fn start(trace_id: TraceId, req: &ServiceRequest) -> Self {
        Self {
            trace_id,
            method: req.method().clone(),
            path: req.path().to_owned(),
            started: Instant::now(),
        }
    }

    fn finish(&self, status: u16, server_error: bool) {
        let Self {
            trace_id,
            method,
            path,
            started,
        } = self;
        let elapsed_ms = started.elapsed().as_millis();
        if server_error {
            warn!(%method, %path, status, elapsed_ms, %trace_id, "request completed");
        } else {
            info!(%method, %path, status, elapsed_ms, %trace_id, "request completed");
        }
    }
}

fn stamp_trace_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(err) => error!(error = %err, %trace_id, "trace id is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let access = AccessLog::start(trace_id, &req);
        let inner = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = inner.await?;
            stamp_trace_header(&mut res, trace_id);
            access.finish(res.status().as_u16(), res.status().is_server_error());
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiResult, Error as DomainError};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use serde_json::Value;

    fn header_of<B>(res: &ServiceResponse<B>) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned()
    }

    #[actix_web::test]
    async fn handler_sees_the_echoed_identifier() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = header_of(&res);
        let body = test::read_body(res).await;

        assert!(header.parse::<TraceId>().is_ok());
        assert_eq!(std::str::from_utf8(&body).expect("utf8"), header);
    }

    #[actix_web::test]
    async fn identifiers_differ_between_requests() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::NoContent().finish() })),
        )
        .await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_ne!(header_of(&first), header_of(&second));
    }

    #[rstest]
    #[case("/missing", StatusCode::NOT_FOUND)]
    #[case("/boom", StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn unsuccessful_responses_are_stamped_too(
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/boom",
            web::get().to(|| async { ApiResult::<HttpResponse>::Err(DomainError::internal("boom")) }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), expected);
        assert!(header_of(&res).parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn error_body_carries_the_same_identifier() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                ApiResult::<HttpResponse>::Err(DomainError::not_found("User not found"))
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = header_of(&res);
        let body: Value = test::read_body_json(res).await;

        assert_eq!(body["trace_id"].as_str(), Some(header.as_str()));
    }
}
