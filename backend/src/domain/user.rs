//! User aggregate and its validated value objects.
//!
//! Every constructor enforces the field rules the service relies on, so a
//! `UserName`, `EmailAddress`, or `Age` that exists is valid by construction.

use std::fmt;

use chrono::{DateTime, Utc};

/// Minimum name length in characters.
pub const NAME_MIN: usize = 2;
/// Maximum name length in characters.
pub const NAME_MAX: usize = 100;
/// Maximum stored email length in characters.
pub const EMAIL_MAX: usize = 255;
/// Youngest accepted age.
pub const AGE_MIN: i32 = 1;
/// Oldest accepted age.
pub const AGE_MAX: i32 = 150;

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("invalid user ID")]
    InvalidId,
    #[error("name is required")]
    EmptyName,
    #[error("name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },
    #[error("email is required")]
    EmptyEmail,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: i32, max: i32 },
}

impl UserValidationError {
    /// Name of the request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameLength { .. } => "name",
            Self::EmptyEmail | Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::AgeOutOfRange { .. } => "age",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::NameLength { .. } => "name_length",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::AgeOutOfRange { .. } => "age_out_of_range",
        }
    }
}

/// Database-assigned user identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// assert_eq!(UserId::new(7).map(|id| id.get()), Ok(7));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        i32::try_from(raw)
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(UserValidationError::InvalidId)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name, 2 to 100 characters and not blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let length = name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&length) {
            return Err(UserValidationError::NameLength {
                min: NAME_MIN,
                max: NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Contact email.
///
/// The shape check is deliberately loose: an `@` and a `.` anywhere. Storage
/// enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !(email.contains('@') && email.contains('.')) {
            return Err(UserValidationError::InvalidEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Age in whole years, 1 to 150 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(i32);

impl Age {
    pub fn new(age: i32) -> Result<Self, UserValidationError> {
        if (AGE_MIN..=AGE_MAX).contains(&age) {
            Ok(Self(age))
        } else {
            Err(UserValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            })
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `created_at` never changes after insert.
/// - `updated_at` is maintained by storage and equals `created_at` until the
///   first update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub age: Age,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub age: Age,
}

impl NewUser {
    /// Validate raw fields in order: name, email, age. The first failure wins.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::NewUser;
    ///
    /// let user = NewUser::try_from_parts("John Doe", "john@example.com", 30).expect("valid");
    /// assert_eq!(user.age.get(), 30);
    /// ```
    pub fn try_from_parts(
        name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
            age: Age::new(age)?,
        })
    }
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub age: Option<Age>,
}

impl UserChanges {
    /// Validate only the fields that are present.
    pub fn try_from_parts(
        name: Option<String>,
        email: Option<String>,
        age: Option<i32>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: name.map(UserName::new).transpose()?,
            email: email.map(EmailAddress::new).transpose()?,
            age: age.map(Age::new).transpose()?,
        })
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    /// Overlay the present fields onto `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

/// One page of users plus the unfiltered total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
