pub mod argon2;
pub mod errors;
pub mod params;
pub mod record;

pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
pub use params::Argon2Params;
pub use record::generate_salt;
pub use record::PasswordRecord;
pub use record::Salt;
