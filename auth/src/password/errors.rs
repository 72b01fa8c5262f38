use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Unsupported password hash variant: {0}")]
    UnsupportedVariant(String),

    #[error("Password does not match")]
    PasswordMismatch,

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
