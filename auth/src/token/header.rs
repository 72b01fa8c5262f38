use serde::Deserialize;
use serde::Serialize;

use super::presence;

/// JOSE header of a compact token.
///
/// Issuance always uses [`Header::jwt_hs256`]; the parsed header of an
/// incoming token is compared against it before the signature is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(
        default,
        skip_serializing_if = "presence::text_unset",
        deserialize_with = "presence::text_or_unset"
    )]
    pub typ: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "presence::text_unset",
        deserialize_with = "presence::text_or_unset"
    )]
    pub alg: Option<String>,
}

impl Header {
    pub const TYPE: &'static str = "JWT";
    pub const ALGORITHM: &'static str = "HS256";

    pub fn jwt_hs256() -> Self {
        Self {
            typ: Some(Self::TYPE.to_string()),
            alg: Some(Self::ALGORITHM.to_string()),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::jwt_hs256()
    }
}
