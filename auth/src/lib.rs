//! Credential and token security core for the forum backend.
//!
//! Provides:
//! - Compact HS256 session tokens (hand-rolled, no JWT library)
//! - Self-describing Argon2id password records
//! - A key provider contract for the HMAC signing key
//! - An authentication coordinator tying the three together
//!
//! Everything here is synchronous and logs nothing; the HTTP boundary decides
//! how errors surface and what gets logged.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use forum_auth::{Argon2Params, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(Argon2Params::new(64, 1, 1));
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(record.as_str(), "my_password").is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use forum_auth::{ClaimSet, SigningKey, TokenCodec, TokenConfig};
//!
//! let codec = TokenCodec::new(&TokenConfig::default());
//! let key = SigningKey::new(b"secret_key_at_least_32_bytes_long!".to_vec()).unwrap();
//! let token = codec.issue(ClaimSet::new().with_email("ada@example.com"), &key).unwrap();
//!
//! let decoded = codec.parse(&token).unwrap();
//! let verified = codec.verify(decoded, &key).unwrap();
//! assert_eq!(verified.email(), Some("ada@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use forum_auth::{Argon2Params, AuthConfig, Authenticator, StaticKeyProvider};
//!
//! let config = AuthConfig {
//!     password: Argon2Params::new(64, 1, 1),
//!     ..AuthConfig::default()
//! };
//! let auth = Authenticator::new(&config, Arc::new(StaticKeyProvider::new(b"secret".to_vec())));
//!
//! // Register: hash password
//! let record = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("ada@example.com", "password123", record.as_str()).unwrap();
//!
//! // Validate token
//! let verified = auth.validate_bearer(&format!("Bearer {}", result.access_token)).unwrap();
//! assert_eq!(verified.email(), Some("ada@example.com"));
//! ```

pub mod authenticator;
pub mod config;
pub mod crypto;
pub mod key;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::TokenConfig;
pub use key::FileKeyProvider;
pub use key::KeyError;
pub use key::KeyProvider;
pub use key::SigningKey;
pub use key::StaticKeyProvider;
pub use password::Argon2Params;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordRecord;
pub use token::peek_claims;
pub use token::ClaimSet;
pub use token::DecodedToken;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::UnverifiedClaims;
pub use token::VerifiedToken;
