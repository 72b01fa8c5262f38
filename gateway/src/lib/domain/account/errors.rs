use forum_auth::AuthenticationError;
use forum_auth::PasswordError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Credential core errors
    #[error("Stored password record rejected: {0}")]
    Password(#[from] PasswordError),

    #[error("Signing key unavailable: {0}")]
    SigningKeyUnavailable(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Password hashing unavailable: {0}")]
    HashingUnavailable(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthenticationError> for AccountError {
    fn from(err: AuthenticationError) -> Self {
        if err.is_key_unavailable() {
            return AccountError::SigningKeyUnavailable(err.to_string());
        }
        match err {
            AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
            AuthenticationError::Password(e) => AccountError::Password(e),
            AuthenticationError::Token(e) => AccountError::TokenIssuance(e.to_string()),
            AuthenticationError::Key(e) => AccountError::SigningKeyUnavailable(e.to_string()),
        }
    }
}
