//! Unsigned token construction

use crate::claims::Claims;
use crate::codec;
use crate::error::TokenResult;
use crate::types::{Header, UnsignedToken};

/// Serialize `header` and `claims` into `b64url(header).b64url(claims)`
///
/// Deterministic: the same inputs always give the same string.
///
/// # Errors
/// Returns `TokenError::InvalidClaims` if `claims` is missing a required value
pub fn build(header: &Header, claims: &Claims) -> TokenResult<UnsignedToken> {
    claims.validate()?;

    let encoded_header = codec::encode_json(header)?;
    let encoded_claims = codec::encode_json(claims)?;

    Ok(UnsignedToken::from_segments(&encoded_header, &encoded_claims))
}
