use chrono::Utc;
use hmac::Hmac;
use hmac::Mac;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;

use super::claims::ClaimSet;
use super::errors::TokenError;
use super::header::Header;
use crate::config::TokenConfig;
use crate::crypto;
use crate::key::KeyError;
use crate::key::SigningKey;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies compact HS256 tokens.
///
/// A token travels `Unsigned -> Signed -> Encoded` inside [`TokenCodec::issue`].
/// On receipt, [`TokenCodec::parse`] yields an unverified [`DecodedToken`] and
/// only [`TokenCodec::verify`] can turn it into a [`VerifiedToken`].
///
/// The codec holds no key: every call borrows the key it needs for its own
/// duration.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    header: Header,
    leeway_seconds: i64,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            header: Header::jwt_hs256(),
            leeway_seconds: config.leeway_seconds(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Sign `claims` into a compact token, using the current time.
    ///
    /// # Errors
    /// * `Key` - The HMAC rejected the key
    /// * `Serialization` - Header or claims could not be encoded as JSON
    pub fn issue(&self, claims: ClaimSet, key: &SigningKey) -> Result<String, TokenError> {
        self.issue_at(claims, key, Utc::now().timestamp())
    }

    /// Sign `claims` into a compact token as of `now` (Unix seconds).
    ///
    /// When the caller has not asserted `nbf`, it is set to `now - leeway` so
    /// the token is accepted immediately by verifiers whose clock lags ours.
    pub fn issue_at(
        &self,
        claims: ClaimSet,
        key: &SigningKey,
        now: i64,
    ) -> Result<String, TokenError> {
        let claims = match claims.not_before {
            Some(_) => claims,
            None => claims.with_not_before(now.saturating_sub(self.leeway_seconds)),
        };

        let header_segment = encode_segment(&self.header)?;
        let claims_segment = encode_segment(&claims)?;
        let signing_input = format!("{}.{}", header_segment, claims_segment);

        let mut mac = new_mac(key)?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            signing_input,
            crypto::encode_url(&signature)
        ))
    }

    /// Decode a compact token without checking anything but its shape.
    ///
    /// # Errors
    /// * `MalformedToken` - Wrong segment count, empty segment, bad base64url or bad JSON
    pub fn parse(&self, compact: &str) -> Result<DecodedToken, TokenError> {
        DecodedToken::parse(compact)
    }

    /// Verify a decoded token using the current time.
    ///
    /// # Errors
    /// * `UnsupportedHeader` - Header is not `{"typ":"JWT","alg":"HS256"}`
    /// * `BadSignature` - Signature does not match the header and claims segments
    /// * `InvalidClaims` - Token is expired or not valid yet
    /// * `Key` - The HMAC rejected the key
    pub fn verify(
        &self,
        token: DecodedToken,
        key: &SigningKey,
    ) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, key, Utc::now().timestamp())
    }

    /// Verify a decoded token as of `now` (Unix seconds).
    ///
    /// The signature is recomputed over the segments exactly as received, never
    /// over re-serialized claims. The signature is checked before the validity
    /// window, and both must pass.
    pub fn verify_at(
        &self,
        token: DecodedToken,
        key: &SigningKey,
        now: i64,
    ) -> Result<VerifiedToken, TokenError> {
        if token.header != self.header {
            return Err(TokenError::UnsupportedHeader(format!(
                "typ={}, alg={}",
                token.header.typ.as_deref().unwrap_or("<none>"),
                token.header.alg.as_deref().unwrap_or("<none>"),
            )));
        }

        let mut mac = new_mac(key)?;
        mac.update(token.signing_input.as_bytes());
        // verify_slice compares in constant time
        mac.verify_slice(&token.signature)
            .map_err(|_| TokenError::BadSignature)?;

        token.claims.check_window(now)?;

        Ok(VerifiedToken {
            header: token.header,
            claims: token.claims,
        })
    }
}

/// A token reconstructed from its wire form. Nothing about it is trusted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    header: Header,
    claims: ClaimSet,
    signature: Vec<u8>,
    signing_input: String,
}

impl DecodedToken {
    /// Split a compact token into its three segments and decode each.
    ///
    /// # Errors
    /// * `MalformedToken` - Wrong segment count, empty segment, bad base64url or bad JSON
    pub fn parse(compact: &str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = compact.split('.').collect();
        let [header_segment, claims_segment, signature_segment] = segments.as_slice() else {
            return Err(TokenError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(TokenError::MalformedToken(
                "token contains an empty segment".to_string(),
            ));
        }

        let header: Header = decode_segment(header_segment, "header")?;
        let claims: ClaimSet = decode_segment(claims_segment, "claims")?;
        let signature = crypto::decode_url(signature_segment)
            .map_err(|e| TokenError::MalformedToken(format!("cannot decode signature: {}", e)))?;

        Ok(Self {
            header,
            claims,
            signature,
            signing_input: format!("{}.{}", header_segment, claims_segment),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Claims as sent by the client. Not authenticated.
    pub fn unverified_claims(&self) -> &ClaimSet {
        &self.claims
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

/// A token whose header, signature and validity window have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    header: Header,
    claims: ClaimSet,
}

impl VerifiedToken {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref()
    }

    pub fn into_claims(self) -> ClaimSet {
        self.claims
    }
}

fn new_mac(key: &SigningKey) -> Result<HmacSha256, TokenError> {
    HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| TokenError::Key(KeyError::Unavailable(e.to_string())))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    serde_json::to_vec(value)
        .map(|json| crypto::encode_url(&json))
        .map_err(|e| TokenError::Serialization(e.to_string()))
}

fn decode_segment<T: DeserializeOwned>(segment: &str, name: &str) -> Result<T, TokenError> {
    let bytes = crypto::decode_url(segment)
        .map_err(|e| TokenError::MalformedToken(format!("cannot decode {}: {}", name, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("cannot parse {}: {}", name, e)))
}
