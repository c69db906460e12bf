//! User domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! any [`UserRepository`]. Field validation happens here; the repository is
//! trusted to do nothing but storage.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    CreateUserInput, UpdateUserInput, UserPersistenceError, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{
    EmailAddress, Error, NewUser, User, UserChanges, UserId, UserPage, UserValidationError,
};

const USER_NOT_FOUND: &str = "User not found";

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_validation_error(error: UserValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn duplicate_email(email: &str) -> Error {
    Error::conflict(format!("user with email {email} already exists")).with_details(json!({
        "field": "email",
        "code": "duplicate_email",
    }))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => duplicate_email(&email),
    }
}

/// Positive ids past the column range cannot name a stored row, so they are
/// reported as missing rather than malformed.
fn parse_id(raw: i64) -> Result<UserId, Error> {
    if raw > i64::from(i32::MAX) {
        return Err(Error::not_found(USER_NOT_FOUND));
    }
    UserId::new(raw).map_err(map_validation_error)
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Fast-path uniqueness check. Storage remains the source of truth, so a
    /// racing writer still surfaces as `DuplicateEmail` from the repository.
    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        owner: Option<UserId>,
    ) -> Result<(), Error> {
        let existing = self
            .repository
            .find_by_email(email)
            .await
            .map_err(map_persistence_error)?;
        match existing {
            Some(user) if Some(user.id) != owner => {
                debug!(user_id = %user.id, "email already registered");
                Err(duplicate_email(email.as_ref()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user(&self, id: i64) -> Result<User, Error> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn list_users(&self, page: Option<i64>, limit: Option<i64>) -> Result<UserPage, Error> {
        let request = PageRequest::normalise(page, limit);
        let users = self
            .repository
            .list_page(request.limit(), request.offset())
            .await
            .map_err(map_persistence_error)?;
        let total = self
            .repository
            .count()
            .await
            .map_err(map_persistence_error)?;
        Ok(UserPage {
            users,
            total,
            page: request.page(),
            limit: request.limit(),
        })
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, input: CreateUserInput) -> Result<User, Error> {
        let new_user = NewUser::try_from_parts(input.name, input.email, input.age)
            .map_err(map_validation_error)?;
        self.ensure_email_available(&new_user.email, None).await?;
        self.repository
            .create(&new_user)
            .await
            .map_err(map_persistence_error)
    }

    async fn update_user(&self, id: i64, input: UpdateUserInput) -> Result<User, Error> {
        let id = parse_id(id)?;
        let changes = UserChanges::try_from_parts(input.name, input.email, input.age)
            .map_err(map_validation_error)?;
        if let Some(email) = &changes.email {
            self.ensure_email_available(email, Some(id)).await?;
        }
        self.repository
            .update(id, &changes)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        let id = parse_id(id)?;
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
