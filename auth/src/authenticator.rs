use std::sync::Arc;

use chrono::Utc;

use crate::config::AuthConfig;
use crate::key::KeyError;
use crate::key::KeyProvider;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordRecord;
use crate::token::strip_bearer;
use crate::token::ClaimSet;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::VerifiedToken;

/// Authentication coordinator combining password verification and token issuance.
///
/// Signing keys are fetched from the [`KeyProvider`] at the start of each
/// issue/verify call and dropped when the call returns.
pub struct Authenticator {
    codec: TokenCodec,
    password_hasher: PasswordHasher,
    keys: Arc<dyn KeyProvider>,
    session_lifetime_seconds: i64,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Compact access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}

impl AuthenticationError {
    /// True when the failure lies with the server's signing key rather than the request.
    pub fn is_key_unavailable(&self) -> bool {
        matches!(
            self,
            AuthenticationError::Key(_) | AuthenticationError::Token(TokenError::Key(_))
        )
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Token and password hashing settings
    /// * `keys` - Source of the HMAC signing key
    pub fn new(config: &AuthConfig, keys: Arc<dyn KeyProvider>) -> Self {
        Self {
            codec: TokenCodec::new(&config.token),
            password_hasher: PasswordHasher::new(config.password),
            keys,
            session_lifetime_seconds: config.token.expiration_seconds(),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a candidate password against a stored record.
    pub fn verify_password(
        &self,
        stored_hash: &str,
        candidate: &str,
    ) -> Result<(), PasswordError> {
        self.password_hasher.verify(stored_hash, candidate)
    }

    /// Whether a stored record should be replaced by one using the current parameters.
    ///
    /// An unparseable record always needs replacing.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        PasswordRecord::parse(stored_hash)
            .map(|record| self.password_hasher.needs_rehash(&record))
            .unwrap_or(true)
    }

    /// Claims for a new login session of `email`, expiring after the configured lifetime.
    pub fn session_claims(&self, email: &str) -> ClaimSet {
        ClaimSet::for_session(email, Utc::now().timestamp(), self.session_lifetime_seconds)
    }

    /// Verify credentials and generate a session token.
    ///
    /// # Arguments
    /// * `email` - Identity placed in the token
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password record
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored record is malformed or unsupported
    /// * `Key` - Signing key could not be loaded
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        stored_hash: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self.password_hasher.verify(stored_hash, password) {
            Ok(()) => {}
            Err(PasswordError::PasswordMismatch) => {
                return Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => return Err(e.into()),
        }

        let access_token = self.issue_token(self.session_claims(email))?;

        Ok(AuthenticationResult { access_token })
    }

    /// Sign arbitrary claims without password verification.
    ///
    /// # Errors
    /// * `Key` - Signing key could not be loaded
    /// * `Token` - Token generation failed
    pub fn issue_token(&self, claims: ClaimSet) -> Result<String, AuthenticationError> {
        let key = self.keys.load()?;
        Ok(self.codec.issue(claims, &key)?)
    }

    /// Parse and verify a compact token.
    ///
    /// Shape is checked before the key is loaded, so garbage input never
    /// touches the key source.
    ///
    /// # Errors
    /// * `Token` - Token is malformed, forged, expired or not yet valid
    /// * `Key` - Signing key could not be loaded
    pub fn validate_token(&self, compact: &str) -> Result<VerifiedToken, AuthenticationError> {
        let decoded = self.codec.parse(compact)?;
        let key = self.keys.load()?;
        Ok(self.codec.verify(decoded, &key)?)
    }

    /// Verify the token of a `Bearer <token>` header value.
    ///
    /// # Errors
    /// * `Token` - Value lacks the `Bearer ` prefix, or the token fails validation
    /// * `Key` - Signing key could not be loaded
    pub fn validate_bearer(
        &self,
        header_value: &str,
    ) -> Result<VerifiedToken, AuthenticationError> {
        let compact = strip_bearer(header_value).ok_or_else(|| {
            TokenError::MalformedToken("expected 'Bearer <token>'".to_string())
        })?;
        self.validate_token(compact)
    }
}
