use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::author::errors::AuthorIdError;
use crate::author::errors::AuthorNameError;
use crate::domain::email::EmailAddress;

/// Author aggregate entity.
///
/// `published_count` is derived from the book collection: it is written
/// only by the counter reconciler, never by general author updates, and
/// equals `count(books where author_id == id)` whenever no reconciliation
/// is in flight.
#[derive(Debug, Clone)]
pub struct Author {
    pub id: AuthorId,
    pub name: AuthorName,
    pub email: EmailAddress,
    pub bio: Option<String>,
    pub published_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(pub Uuid);

impl AuthorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an author ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AuthorIdError> {
        Uuid::parse_str(s)
            .map(AuthorId)
            .map_err(|e| AuthorIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Author name value type, 2-128 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 128;

    /// Create a new valid author name.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 2 characters
    /// * `TooLong` - Name longer than 128 characters
    pub fn new(name: String) -> Result<Self, AuthorNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(AuthorNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(AuthorNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new author with validated fields.
///
/// `published_count` is not part of the command: new authors start at zero
/// and only the reconciler moves it.
#[derive(Debug)]
pub struct CreateAuthorCommand {
    pub name: AuthorName,
    pub email: EmailAddress,
    pub bio: Option<String>,
}

impl CreateAuthorCommand {
    pub fn new(name: AuthorName, email: EmailAddress, bio: Option<String>) -> Self {
        Self { name, email, bio }
    }
}

/// Command to update an existing author with optional validated fields.
#[derive(Debug)]
pub struct UpdateAuthorCommand {
    pub name: Option<AuthorName>,
    pub email: Option<EmailAddress>,
    pub bio: Option<String>,
}
