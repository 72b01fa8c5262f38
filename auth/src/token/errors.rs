use thiserror::Error;

use crate::key::KeyError;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Header names a type or algorithm other than `JWT`/`HS256`. Checked
    /// before the signature, so it is reported ahead of `BadSignature`.
    #[error("Unsupported token header: {0}")]
    UnsupportedHeader(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token claims are invalid: {0}")]
    InvalidClaims(ClaimViolation),

    #[error("Signing key rejected: {0}")]
    Key(#[from] KeyError),

    #[error("Failed to serialize token: {0}")]
    Serialization(String),
}

/// Which part of the validity window a token failed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ClaimViolation {
    #[error("token is expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,
}

impl From<ClaimViolation> for TokenError {
    fn from(violation: ClaimViolation) -> Self {
        TokenError::InvalidClaims(violation)
    }
}
