//! Token signing

use crate::builder;
use crate::claims::Claims;
use crate::codec;
use crate::crypto::hmac_sha256::hmac_sha256_sign;
use crate::error::TokenResult;
use crate::key::SecretKey;
use crate::types::{Header, SignedToken, UnsignedToken};
use std::sync::Arc;

/// Append `.b64url(HMAC-SHA256(unsigned, key))` to `unsigned`
///
/// # Errors
/// Returns `TokenError::InvalidKey` if the key cannot initialise the MAC
pub fn sign(unsigned: UnsignedToken, key: &SecretKey) -> TokenResult<SignedToken> {
    let signature = hmac_sha256_sign(unsigned.as_str().as_bytes(), key)?;
    let encoded = codec::encode(signature);
    Ok(SignedToken::from_parts(unsigned, &encoded))
}

/// Issues signed tokens with a shared key
///
/// Cheap to clone; every clone signs with the same key.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    key: Arc<SecretKey>,
    header: Header,
}

impl TokenSigner {
    /// Create a signer over `key`
    #[must_use]
    pub fn new(key: Arc<SecretKey>) -> Self {
        Self {
            key,
            header: Header::hs256(),
        }
    }

    /// Sign an already built token
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` if the key cannot initialise the MAC
    pub fn sign(&self, unsigned: UnsignedToken) -> TokenResult<SignedToken> {
        sign(unsigned, &self.key)
    }

    /// Build and sign a token for `claims`
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` if `claims` is missing a required value
    pub fn issue(&self, claims: &Claims) -> TokenResult<SignedToken> {
        let unsigned = builder::build(&self.header, claims)?;
        self.sign(unsigned)
    }
}
