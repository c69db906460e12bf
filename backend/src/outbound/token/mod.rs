//! Bearer token adapters.

mod jwt;

pub use jwt::{Claims, JwtTokenVerifier, TokenIssueError};
