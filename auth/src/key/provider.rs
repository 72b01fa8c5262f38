use std::fs;
use std::path::Path;
use std::path::PathBuf;

use zeroize::Zeroizing;

use super::errors::KeyError;
use super::signing_key::SigningKey;

/// Source of HMAC signing keys.
///
/// Implementations are consulted once per issue/verify call; the returned key
/// is dropped (and wiped) when that call finishes.
pub trait KeyProvider: Send + Sync {
    /// Load the current signing key.
    ///
    /// # Errors
    /// * `Unavailable` - The key source could not be read or holds no key
    fn load(&self) -> Result<SigningKey, KeyError>;
}

/// Reads the raw bytes of a key file on every load.
///
/// The file content is used verbatim, trailing newline included, so a key
/// generated with `openssl rand -hex 256 -out jwt.key` works unchanged.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyProvider for FileKeyProvider {
    fn load(&self) -> Result<SigningKey, KeyError> {
        let bytes = fs::read(&self.path).map_err(|e| {
            KeyError::Unavailable(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        SigningKey::new(bytes).map_err(|_| {
            KeyError::Unavailable(format!("key file {} is empty", self.path.display()))
        })
    }
}

/// Serves a key held in memory, handing out a fresh copy per load.
pub struct StaticKeyProvider {
    bytes: Zeroizing<Vec<u8>>,
}

impl StaticKeyProvider {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn load(&self) -> Result<SigningKey, KeyError> {
        SigningKey::new(self.bytes.to_vec())
    }
}
