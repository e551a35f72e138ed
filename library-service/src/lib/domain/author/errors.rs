use thiserror::Error;

use crate::domain::email::EmailError;

/// Error for AuthorId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorIdError {
    #[error("Not a valid UUID: {0}")]
    InvalidFormat(String),
}

/// Error for AuthorName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorNameError {
    #[error("Author name must have at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Author name must have at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all author-related operations
#[derive(Debug, Clone, Error)]
pub enum AuthorError {
    #[error("Invalid author id: {0}")]
    InvalidAuthorId(#[from] AuthorIdError),

    #[error("Invalid author name: {0}")]
    InvalidName(#[from] AuthorNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Author not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Storage error: {0}")]
    DatabaseError(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthorError {
    fn from(err: anyhow::Error) -> Self {
        AuthorError::Unknown(err.to_string())
    }
}
