use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::PasswordError;
use super::params::Argon2Params;
use crate::crypto;

pub const ALGORITHM: &str = "argon2id";
pub const VERSION: u32 = 0x13;
pub const SALT_LEN: usize = 16;

/// Generate 16 bytes of salt from the operating system's CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Salt as it appears in the record.
///
/// Random salt bytes are stored as unpadded standard base64, and the text of
/// that segment is what the key derivation consumes. Existing records hashed
/// this way keep verifying byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    pub fn generate() -> Self {
        Self::from_bytes(&generate_salt())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(crypto::encode_std(bytes))
    }

    /// Take a salt segment verbatim.
    ///
    /// # Errors
    /// * `MalformedHash` - Segment is empty or contains `$`
    pub fn from_encoded(segment: impl Into<String>) -> Result<Self, PasswordError> {
        let segment = segment.into();
        if segment.is_empty() || segment.contains('$') {
            return Err(PasswordError::MalformedHash(
                "salt segment must be non-empty and free of '$'".to_string(),
            ));
        }
        Ok(Self(segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn kdf_input(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Self-describing Argon2id password record:
/// `$argon2id$v=19$m=<KiB>$t=<passes>$p=<lanes>$<salt>$<derived key>`.
///
/// Immutable. Changing a password means hashing again, never editing a record.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordRecord {
    params: Argon2Params,
    salt: Salt,
    derived_key: Vec<u8>,
    encoded: String,
}

impl PasswordRecord {
    pub(crate) fn new(params: Argon2Params, salt: Salt, derived_key: Vec<u8>) -> Self {
        let encoded = format!(
            "${}$v={}$m={}$t={}$p={}${}${}",
            ALGORITHM,
            VERSION,
            params.memory_kib,
            params.time_cost,
            params.parallelism,
            salt.as_str(),
            crypto::encode_std(&derived_key),
        );

        Self {
            params,
            salt,
            derived_key,
            encoded,
        }
    }

    /// Parse a stored record.
    ///
    /// The returned record keeps the input string untouched; its parameters'
    /// `output_len` is the length of the stored derived key.
    ///
    /// # Errors
    /// * `UnsupportedVariant` - Algorithm tag is not `argon2id`
    /// * `MalformedHash` - Missing leading `$`, segment count other than 7, a
    ///   version other than 19, a non-numeric cost, or an undecodable salt/key
    pub fn parse(encoded: &str) -> Result<Self, PasswordError> {
        let body = encoded.strip_prefix('$').ok_or_else(|| {
            PasswordError::MalformedHash("record must start with '$'".to_string())
        })?;

        let segments: Vec<&str> = body.split('$').collect();
        let [algorithm, version, memory, time, parallelism, salt, derived_key] =
            segments.as_slice()
        else {
            return Err(PasswordError::MalformedHash(format!(
                "expected 7 segments, found {}",
                segments.len()
            )));
        };

        if *algorithm != ALGORITHM {
            return Err(PasswordError::UnsupportedVariant(algorithm.to_string()));
        }

        if *version != format!("v={}", VERSION) {
            return Err(PasswordError::MalformedHash(format!(
                "unsupported version segment '{}'",
                version
            )));
        }

        let memory_kib = parse_cost(memory, "m")?;
        let time_cost = parse_cost(time, "t")?;
        let parallelism = parse_cost(parallelism, "p")?;
        let salt = Salt::from_encoded(*salt)?;

        let derived_key = crypto::decode_std(derived_key)
            .map_err(|e| PasswordError::MalformedHash(format!("cannot decode key: {}", e)))?;
        if derived_key.is_empty() {
            return Err(PasswordError::MalformedHash("derived key is empty".to_string()));
        }

        Ok(Self {
            params: Argon2Params {
                memory_kib,
                time_cost,
                parallelism,
                output_len: derived_key.len(),
            },
            salt,
            derived_key,
            encoded: encoded.to_string(),
        })
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn into_string(self) -> String {
        self.encoded
    }
}

impl fmt::Display for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRecord")
            .field("params", &self.params)
            .field("salt", &self.salt)
            .field("derived_key", &"[HASH]")
            .finish()
    }
}

impl FromStr for PasswordRecord {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse `<name>=<unsigned integer>`.
fn parse_cost(segment: &str, name: &str) -> Result<u32, PasswordError> {
    let value = segment
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| {
            PasswordError::MalformedHash(format!("expected '{}=' in '{}'", name, segment))
        })?;

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PasswordError::MalformedHash(format!(
            "cost '{}' is not an unsigned integer",
            segment
        )));
    }

    value.parse::<u32>().map_err(|e| {
        PasswordError::MalformedHash(format!("cost '{}' out of range: {}", segment, e))
    })
}
