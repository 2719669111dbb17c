//! HMAC-SHA256 operations for token signing and verification

use crate::codec;
use crate::error::{TokenError, TokenResult};
use crate::key::SecretKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Raw HMAC-SHA256 tag over `message`
pub(crate) fn hmac_sha256_sign(message: &[u8], key: &SecretKey) -> TokenResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key.expose())
        .map_err(|_| TokenError::invalid_key("Invalid HMAC key"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Check an encoded signature segment against `message`
///
/// Compares the canonical encoding of the expected tag with the supplied
/// segment in constant time, so a corrupted segment is a mismatch rather than
/// a decoding error.
pub(crate) fn hs256_verify(message: &[u8], signature_b64: &str, key: &SecretKey) -> TokenResult<bool> {
    let expected = codec::encode(hmac_sha256_sign(message, key)?);
    Ok(expected.as_bytes().ct_eq(signature_b64.as_bytes()).into())
}
