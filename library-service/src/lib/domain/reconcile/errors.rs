use thiserror::Error;

/// Error type for counter reconciliation.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("Failed to count books: {0}")]
    CountFailed(String),

    #[error("Failed to persist published count: {0}")]
    PersistFailed(String),

    #[error("Failed to enumerate authors: {0}")]
    ListFailed(String),
}
