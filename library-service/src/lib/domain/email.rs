use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Email address value type, shared by users and authors.
///
/// Format is checked with an RFC 5322 compliant parser; uniqueness is a
/// storage concern enforced per collection by the repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Not a valid email address: {0}")]
    InvalidFormat(String),
}

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        match email_address::EmailAddress::from_str(&email) {
            Ok(_) => Ok(Self(email)),
            Err(e) => Err(EmailError::InvalidFormat(e.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
