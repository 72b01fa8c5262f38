use argon2::Algorithm;
use argon2::Argon2;
use argon2::Version;

use super::errors::PasswordError;
use super::params::Argon2Params;
use super::record::PasswordRecord;
use super::record::Salt;
use crate::crypto;

/// Argon2id password hashing with self-describing records.
///
/// The configured parameters only apply to new hashes; verification always
/// uses the parameters stored in the record, so costs can be raised without
/// migrating existing hashes.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: Argon2Params,
}

impl PasswordHasher {
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `InvalidParams` - The configured parameters are rejected by Argon2
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        self.hash_with(password, &Salt::generate(), &self.params)
    }

    /// Hash a plaintext password with an explicit salt and parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - `params` are rejected by Argon2
    /// * `HashingFailed` - Key derivation failed (e.g. salt shorter than 8 bytes)
    pub fn hash_with(
        &self,
        password: &str,
        salt: &Salt,
        params: &Argon2Params,
    ) -> Result<PasswordRecord, PasswordError> {
        let argon2 = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            params
                .to_argon2()
                .map_err(|e| PasswordError::InvalidParams(e.to_string()))?,
        );

        let mut derived_key = vec![0u8; params.output_len];
        argon2
            .hash_password_into(password.as_bytes(), salt.kdf_input(), &mut derived_key)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(PasswordRecord::new(*params, salt.clone(), derived_key))
    }

    /// Verify a candidate password against a stored record.
    ///
    /// The candidate is hashed again with the record's own salt and costs, and
    /// the whole re-encoded record is compared with `stored_hash` in constant
    /// time. A record whose parameter segments were altered therefore fails
    /// even if its derived-key bytes were left intact.
    ///
    /// # Errors
    /// * `MalformedHash` - Record cannot be parsed, or Argon2 rejects its parameters
    /// * `UnsupportedVariant` - Record is not `argon2id`
    /// * `PasswordMismatch` - Candidate does not reproduce the record
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> Result<(), PasswordError> {
        let record = PasswordRecord::parse(stored_hash)?;

        let expected = self
            .hash_with(candidate, record.salt(), record.params())
            .map_err(|e| match e {
                PasswordError::InvalidParams(msg) | PasswordError::HashingFailed(msg) => {
                    PasswordError::MalformedHash(msg)
                }
                other => other,
            })?;

        if crypto::constant_time_eq(expected.as_str().as_bytes(), stored_hash.as_bytes()) {
            Ok(())
        } else {
            Err(PasswordError::PasswordMismatch)
        }
    }

    /// Whether `record` was produced with parameters other than the configured ones.
    pub fn needs_rehash(&self, record: &PasswordRecord) -> bool {
        record.params() != &self.params
    }
}
