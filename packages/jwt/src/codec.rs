//! Base64url codec (RFC 7515 section 2)
//!
//! URL-safe alphabet, no `=` padding. Decoding rejects `+`, `/`, `=`, any
//! other byte outside the alphabet, lengths that cannot be padded to a
//! multiple of four, and non-canonical trailing bits.

use crate::error::{TokenError, TokenResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;

/// Encode bytes as unpadded base64url
#[inline]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded base64url
///
/// # Errors
/// Returns `TokenError::MalformedEncoding` for any input `encode` cannot produce
#[inline]
pub fn decode(input: &str) -> TokenResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| TokenError::MalformedEncoding)
}

/// Serialize `value` to JSON and encode the UTF-8 bytes
pub(crate) fn encode_json<T: Serialize>(value: &T) -> TokenResult<String> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::serialization(&e.to_string()))?;
    Ok(encode(json))
}
