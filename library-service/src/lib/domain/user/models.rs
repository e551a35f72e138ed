use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::email::EmailAddress;
use crate::user::errors::NicknameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account able to authenticate against the
/// service. The password is stored only as an Argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub nickname: Nickname,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type, 2-64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 64;

    /// Create a new valid nickname.
    ///
    /// # Errors
    /// * `TooShort` - Nickname shorter than 2 characters
    /// * `TooLong` - Nickname longer than 64 characters
    pub fn new(nickname: String) -> Result<Self, NicknameError> {
        let length = nickname.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NicknameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NicknameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(nickname))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user with validated fields.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub nickname: Nickname,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateUserCommand {
    pub fn new(nickname: Nickname, email: EmailAddress, password: String) -> Self {
        Self {
            nickname,
            email,
            password,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields are updated; a provided password is re-hashed by
/// the service.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub nickname: Option<Nickname>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
}
