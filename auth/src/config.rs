use serde::Deserialize;

use crate::password::Argon2Params;

/// Configuration for the whole credential core.
///
/// Every field has a default so partial configuration files deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token: TokenConfig,
    pub password: Argon2Params,
}

/// Token issuance settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Backward offset applied to `nbf` at issuance to absorb clock skew.
    pub leeway_minutes: i64,

    /// Lifetime of session tokens issued at login.
    pub expiration_hours: i64,
}

impl TokenConfig {
    pub const DEFAULT_LEEWAY_MINUTES: i64 = 10;
    pub const DEFAULT_EXPIRATION_HOURS: i64 = 7 * 24;

    /// Saturates instead of overflowing on out-of-range configuration.
    pub fn leeway_seconds(&self) -> i64 {
        self.leeway_minutes.saturating_mul(60)
    }

    pub fn expiration_seconds(&self) -> i64 {
        self.expiration_hours.saturating_mul(60 * 60)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            leeway_minutes: Self::DEFAULT_LEEWAY_MINUTES,
            expiration_hours: Self::DEFAULT_EXPIRATION_HOURS,
        }
    }
}
