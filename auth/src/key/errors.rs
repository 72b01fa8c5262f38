use thiserror::Error;

/// Error type for signing key retrieval.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Signing key unavailable: {0}")]
    Unavailable(String),
}
