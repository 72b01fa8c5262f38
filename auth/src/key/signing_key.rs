use std::fmt;

use zeroize::Zeroizing;

use super::errors::KeyError;

/// Secret HMAC key material.
///
/// The bytes are wiped when the key is dropped. The type is deliberately not
/// `Clone`: a key handed out by a [`KeyProvider`](super::KeyProvider) belongs to
/// the single operation that requested it.
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    /// * `Unavailable` - The key material is empty
    pub fn new(bytes: Vec<u8>) -> Result<Self, KeyError> {
        if bytes.is_empty() {
            return Err(KeyError::Unavailable("key material is empty".to_string()));
        }
        Ok(Self(Zeroizing::new(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"[REDACTED]").finish()
    }
}
