use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
