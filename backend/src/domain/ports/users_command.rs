//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Unvalidated create input as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Unvalidated partial update. `None` means the field was not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Domain use-case port for creating, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and insert a user, rejecting duplicate emails.
    async fn create_user(&self, input: CreateUserInput) -> Result<User, Error>;

    /// Validate the present fields and apply them to an existing user.
    async fn update_user(&self, id: i64, input: UpdateUserInput) -> Result<User, Error>;

    /// Remove an existing user.
    async fn delete_user(&self, id: i64) -> Result<(), Error>;
}
