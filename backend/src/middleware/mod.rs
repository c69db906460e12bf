//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently trace
//! identifiers and access logging. Bearer authentication lives with the HTTP
//! adapter because it speaks the error envelope.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
