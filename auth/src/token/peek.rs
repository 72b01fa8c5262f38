//! Unauthenticated read of the claims inside a bearer value.
//!
//! Nothing here checks a signature. The result is a claim the caller *makes*
//! about itself, good for log fields or for deciding whether to bother
//! verifying, never for authorization.

use super::claims::ClaimSet;
use crate::crypto;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Return the compact token of a `Bearer <token>` header value.
pub fn strip_bearer(value: &str) -> Option<&str> {
    value.strip_prefix(BEARER_PREFIX)
}

/// Claims decoded from a bearer value whose signature was never checked.
///
/// Kept as a separate type so it cannot be passed where a
/// [`VerifiedToken`](super::VerifiedToken) is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnverifiedClaims(ClaimSet);

impl UnverifiedClaims {
    /// Email the caller claims to be. Unauthenticated.
    pub fn claimed_email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == ClaimSet::default()
    }

    pub fn into_inner(self) -> ClaimSet {
        self.0
    }
}

/// Best-effort decode of the claims segment of a `Bearer` header value.
///
/// Any malformed input yields empty claims instead of an error.
pub fn peek_claims(bearer: &str) -> UnverifiedClaims {
    strip_bearer(bearer)
        .and_then(decode_claims_segment)
        .map(UnverifiedClaims)
        .unwrap_or_default()
}

fn decode_claims_segment(compact: &str) -> Option<ClaimSet> {
    let segments: Vec<&str> = compact.split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let bytes = crypto::decode_url(segments[1]).ok()?;
    serde_json::from_slice(&bytes).ok()
}
