use serde::Deserialize;

/// Argon2id cost parameters.
///
/// Passed explicitly to [`PasswordHasher`](super::PasswordHasher); records
/// carry their own copy so verification never depends on this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Argon2Params {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub time_cost: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,

    /// Derived key length in bytes
    pub output_len: usize,
}

impl Argon2Params {
    pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
    pub const DEFAULT_TIME_COST: u32 = 1;
    pub const DEFAULT_PARALLELISM: u32 = 4;
    pub const DEFAULT_OUTPUT_LEN: usize = 32;

    pub fn new(memory_kib: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            time_cost,
            parallelism,
            output_len: Self::DEFAULT_OUTPUT_LEN,
        }
    }

    pub(crate) fn to_argon2(self) -> Result<argon2::Params, argon2::Error> {
        argon2::Params::new(
            self.memory_kib,
            self.time_cost,
            self.parallelism,
            Some(self.output_len),
        )
    }
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MEMORY_KIB,
            Self::DEFAULT_TIME_COST,
            Self::DEFAULT_PARALLELISM,
        )
    }
}
