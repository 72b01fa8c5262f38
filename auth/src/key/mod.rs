pub mod errors;
pub mod provider;
pub mod signing_key;

pub use errors::KeyError;
pub use provider::FileKeyProvider;
pub use provider::KeyProvider;
pub use provider::StaticKeyProvider;
pub use signing_key::SigningKey;
