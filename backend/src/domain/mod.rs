//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed user entities and the use cases over them,
//! independent of HTTP and storage.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and its value objects (`UserId`, `UserName`, `EmailAddress`, `Age`).
//! - UserService: implements the `UsersQuery`/`UsersCommand` driving ports.
//! - HealthService: aggregates sub-checks into a `HealthReport`.

pub mod error;
pub mod health;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::health::{
    ComponentHealth, HealthReport, HealthService, HealthStatus, SERVICE_VERSION, format_uptime,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    AGE_MAX, AGE_MIN, Age, EMAIL_MAX, EmailAddress, NAME_MAX, NAME_MIN, NewUser, User,
    UserChanges, UserId, UserName, UserPage, UserValidationError,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use users_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
