use serde::Deserialize;
use serde::Serialize;

use super::errors::ClaimViolation;
use super::presence;

/// Identity and validity window carried by a token.
///
/// All fields are optional. A zero timestamp or empty email means "not
/// asserted": builders normalize such values to `None`, they are never
/// serialized, and they decode back to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Expiration time (Unix timestamp)
    #[serde(
        rename = "exp",
        default,
        skip_serializing_if = "presence::timestamp_unset",
        deserialize_with = "presence::timestamp_or_unset"
    )]
    pub expires_at: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(
        rename = "nbf",
        default,
        skip_serializing_if = "presence::timestamp_unset",
        deserialize_with = "presence::timestamp_or_unset"
    )]
    pub not_before: Option<i64>,

    /// Subject email address
    #[serde(
        default,
        skip_serializing_if = "presence::text_unset",
        deserialize_with = "presence::text_or_unset"
    )]
    pub email: Option<String>,
}

impl ClaimSet {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a login session of `lifetime_seconds`, starting at `now`.
    pub fn for_session(email: impl Into<String>, now: i64, lifetime_seconds: i64) -> Self {
        Self::new()
            .with_email(email)
            .with_expiration(now.saturating_add(lifetime_seconds))
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = presence::normalize_text(email.into());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.expires_at = presence::normalize_timestamp(exp);
        self
    }

    /// Set not-before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.not_before = presence::normalize_timestamp(nbf);
        self
    }

    /// Expired once `now` reaches `exp`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    pub fn is_not_yet_valid(&self, now: i64) -> bool {
        self.not_before.is_some_and(|nbf| now < nbf)
    }

    /// Check the validity window against `now`.
    ///
    /// # Errors
    /// * `Expired` - `exp` is asserted and `now >= exp`
    /// * `NotYetValid` - `nbf` is asserted and `now < nbf`
    pub fn check_window(&self, now: i64) -> Result<(), ClaimViolation> {
        if self.is_expired(now) {
            return Err(ClaimViolation::Expired);
        }
        if self.is_not_yet_valid(now) {
            return Err(ClaimViolation::NotYetValid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = ClaimSet::new().with_email("ada@example.com");
        assert_eq!(claims.email, Some("ada@example.com".to_string()));
        assert!(claims.expires_at.is_none());
        assert!(claims.not_before.is_none());
    }

    #[test]
    fn test_for_session() {
        let claims = ClaimSet::for_session("ada@example.com", 1_000, 3_600);

        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.expires_at, Some(4_600));
        assert_eq!(claims.not_before, None);
    }

    #[test]
    fn test_for_session_saturates_far_future_expiry() {
        let claims = ClaimSet::for_session("ada@example.com", 1_700_000_000, i64::MAX);

        assert_eq!(claims.expires_at, Some(i64::MAX));
    }

    #[test]
    fn test_zero_and_empty_are_not_asserted() {
        let claims = ClaimSet::new()
            .with_email("")
            .with_expiration(0)
            .with_not_before(0);

        assert_eq!(claims, ClaimSet::default());
        assert_eq!(serde_json::to_string(&claims).unwrap(), "{}");
    }

    #[test]
    fn test_wire_field_order_and_names() {
        let claims = ClaimSet::new()
            .with_email("ada@example.com")
            .with_not_before(1_699_999_400)
            .with_expiration(1_700_003_600);

        assert_eq!(
            serde_json::to_string(&claims).unwrap(),
            r#"{"exp":1700003600,"nbf":1699999400,"email":"ada@example.com"}"#
        );
    }

    #[test]
    fn test_zero_on_the_wire_decodes_as_unset() {
        let claims: ClaimSet =
            serde_json::from_str(r#"{"exp":0,"nbf":null,"email":"","role":"admin"}"#).unwrap();
        assert_eq!(claims, ClaimSet::default());
    }

    #[test]
    fn test_is_expired() {
        let claims = ClaimSet::new().with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = ClaimSet::new();
        assert!(!claims.is_expired(9_999_999_999));
    }

    #[test]
    fn test_check_window() {
        let claims = ClaimSet::new().with_not_before(100).with_expiration(200);

        assert_eq!(claims.check_window(99), Err(ClaimViolation::NotYetValid));
        assert_eq!(claims.check_window(100), Ok(()));
        assert_eq!(claims.check_window(199), Ok(()));
        assert_eq!(claims.check_window(200), Err(ClaimViolation::Expired));
    }
}
