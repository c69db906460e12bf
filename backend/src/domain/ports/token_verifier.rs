//! Driven port for bearer token authenticity checks.
//!
//! Verification answers one question: was this token minted by us and is it
//! still valid? Claims are not surfaced, so no authorisation decision can be
//! built on top of this port.

use super::define_port_error;

define_port_error! {
    /// Reasons a bearer credential is rejected.
    pub enum TokenError {
        /// No `Authorization` header was sent.
        Missing => "Authorization header required",
        /// The header is not `Bearer <token>`.
        Malformed => "Invalid authorization header format",
        /// Signature or expiry check failed.
        Invalid { message: String } => "Invalid or expired token",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Accept or reject a raw token string.
    fn verify(&self, token: &str) -> Result<(), TokenError>;
}
