//! Driving port for user read operations.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserPage};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user by raw identifier. Non-positive ids are rejected.
    async fn get_user(&self, id: i64) -> Result<User, Error>;

    /// List one page of users. Out-of-range paging input is normalised.
    async fn list_users(&self, page: Option<i64>, limit: Option<i64>) -> Result<UserPage, Error>;
}
