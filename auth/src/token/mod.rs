pub mod claims;
pub mod codec;
pub mod errors;
pub mod header;
pub mod peek;
mod presence;

pub use claims::ClaimSet;
pub use codec::DecodedToken;
pub use codec::TokenCodec;
pub use codec::VerifiedToken;
pub use errors::ClaimViolation;
pub use errors::TokenError;
pub use header::Header;
pub use peek::peek_claims;
pub use peek::strip_bearer;
pub use peek::UnverifiedClaims;
