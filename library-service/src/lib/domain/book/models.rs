use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::book::errors::BookIdError;
use crate::book::errors::BookTitleError;
use crate::domain::author::models::AuthorId;

/// Book aggregate entity.
///
/// `author_id` is a plain foreign reference: a book always points at
/// exactly one existing author, and the relation is resolved by explicit
/// lookup, never auto-hydrated.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub description: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub available: bool,
    pub author_id: AuthorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book title value type, 2-256 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 256;

    /// Create a new valid book title.
    ///
    /// # Errors
    /// * `TooShort` - Title shorter than 2 characters
    /// * `TooLong` - Title longer than 256 characters
    pub fn new(title: String) -> Result<Self, BookTitleError> {
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            Err(BookTitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(BookTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new book with validated fields.
#[derive(Debug)]
pub struct CreateBookCommand {
    pub title: BookTitle,
    pub description: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub available: bool,
    pub author_id: AuthorId,
}

/// Command to update an existing book with optional validated fields.
#[derive(Debug)]
pub struct UpdateBookCommand {
    pub title: Option<BookTitle>,
    pub description: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub available: Option<bool>,
    pub author_id: Option<AuthorId>,
}
