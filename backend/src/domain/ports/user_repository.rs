//! Port abstraction for user persistence adapters and their errors.
//!
//! Absent rows are reported through `Option`/`bool` rather than an error
//! variant so callers can tell "not found" apart from storage failures.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{EmailAddress, NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The storage-level unique constraint on email rejected the write.
        DuplicateEmail { email: String } => "user with email {email} already exists",
    }
}

/// Driven port over the users table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a row and return it with the assigned id and timestamps.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Return up to `limit` users starting at `offset`, newest first.
    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserPersistenceError>;

    /// Overlay `changes` onto the stored row. `None` when the row is absent.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove the row. `false` when nothing was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Total number of rows.
    async fn count(&self) -> Result<i64, UserPersistenceError>;
}

/// In-memory repository used by HTTP tests and local tooling.
///
/// Mirrors the storage contract: ids are assigned monotonically, email is
/// unique, listing is newest first.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    state: Mutex<FixtureState>,
}

#[derive(Debug, Default)]
struct FixtureState {
    next_id: i64,
    rows: BTreeMap<UserId, User>,
}

impl FixtureUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, FixtureState>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::connection("fixture store poisoned"))
    }
}

impl FixtureState {
    fn email_taken(&self, email: &EmailAddress, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|user| user.email == *email && Some(user.id) != except)
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        if state.email_taken(&user.email, None) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        state.next_id += 1;
        let id = UserId::new(state.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let now = Utc::now();
        let stored = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserPersistenceError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);
        // Ids grow with insertion time, so reverse id order is newest first.
        Ok(self
            .lock()?
            .rows
            .values()
            .rev()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock()?;
        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id)) {
                return Err(UserPersistenceError::duplicate_email(email.as_ref()));
            }
        }
        let Some(user) = state.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, UserPersistenceError> {
        let total = self.lock()?.rows.len();
        i64::try_from(total).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}
