use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Not a valid UUID: {0}")]
    InvalidFormat(String),
}

/// Error for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookTitleError {
    #[error("Book title must have at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Book title must have at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book id: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid book title: {0}")]
    InvalidTitle(#[from] BookTitleError),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    /// The book row was written but the author's published count could not
    /// be brought up to date; the stored count stays stale until the next
    /// scheduled reconciliation.
    #[error("Published count reconciliation failed: {0}")]
    CountReconciliation(String),

    #[error("Storage error: {0}")]
    DatabaseError(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for BookError {
    fn from(err: anyhow::Error) -> Self {
        BookError::Unknown(err.to_string())
    }
}
