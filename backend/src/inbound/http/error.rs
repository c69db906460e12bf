//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the error envelope and a status code.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Label used for every 401 instead of the bare status reason.
pub const AUTHENTICATION_ERROR_LABEL: &str = "Authentication Error";
/// Message sent instead of any internal error text.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Wire shape of every error response.
///
/// Example JSON:
/// `{"error":"Not Found","message":"User not found","code":404,"trace_id":"..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Short label, the status reason phrase.
    #[schema(example = "Bad Request")]
    pub error: String,
    /// Human-readable cause.
    #[schema(example = "name is required")]
    pub message: String,
    /// Numeric HTTP status.
    #[schema(example = 400)]
    pub code: u16,
    /// Correlation id matching the `trace-id` response header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Structured context such as the offending field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        // Conflicts are client-correctable input problems on this API.
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn label_for(code: ErrorCode, status: StatusCode) -> String {
    if matches!(code, ErrorCode::Unauthorized) {
        return AUTHENTICATION_ERROR_LABEL.to_owned();
    }
    status.canonical_reason().unwrap_or("Error").to_owned()
}

impl ErrorEnvelope {
    /// Project a domain error onto the wire, redacting internal failures.
    pub fn from_error(error: &Error) -> Self {
        let status = status_for(error.code());
        let internal = status.is_server_error();
        Self {
            error: label_for(error.code(), status),
            message: if internal {
                REDACTED_MESSAGE.to_owned()
            } else {
                error.message().to_owned()
            },
            code: status.as_u16(),
            trace_id: error.trace_id().map(str::to_owned),
            details: if internal {
                None
            } else {
                error.details().cloned()
            },
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = %self.code(), message = self.message(), "request failed");
        }
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(ErrorEnvelope::from_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// `JsonConfig` error handler: any body decode failure becomes a 400 envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting request body");
    Error::invalid_request("Invalid JSON payload").into()
}

/// `QueryConfig` error handler for malformed query strings.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting query string");
    Error::invalid_request("Invalid query parameters").into()
}
