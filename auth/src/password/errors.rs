use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Could not hash password: {0}")]
    HashingFailed(String),

    #[error("Could not verify password against stored hash: {0}")]
    VerificationFailed(String),
}
