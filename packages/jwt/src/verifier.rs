//! Token verification
//!
//! The only way to recover claims from a token. Signature first, then
//! header, then claims, then expiry.

use crate::claims::Claims;
use crate::codec;
use crate::crypto::hmac_sha256::hs256_verify;
use crate::error::{TokenError, TokenResult};
use crate::key::SecretKey;
use crate::types::Header;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

const SEGMENT_COUNT: usize = 3;

/// Verification options
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Clock skew tolerated when checking expiry
    pub leeway: Duration,
    /// Reject tokens whose expiry has passed
    pub validate_exp: bool,
    /// Reject tokens that carry no expiry at all
    pub require_exp: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            leeway: Duration::seconds(60),
            validate_exp: true,
            require_exp: false,
        }
    }
}

impl VerifyOptions {
    /// Set the clock skew tolerance
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set whether tokens must carry an expiry
    #[must_use]
    pub fn require_expiry(mut self, require: bool) -> Self {
        self.require_exp = require;
        self
    }
}

/// Verify `token` with `key` under default options
///
/// # Errors
/// - `MalformedToken` unless there are exactly three segments
/// - `InvalidSignature` if the signature does not match
/// - `UnsupportedHeader` if the header is not the HS256 header
/// - `MalformedClaims` if the claims cannot be decoded
/// - `Expired` if the claims carry an expiry that has passed
pub fn verify(token: &str, key: &SecretKey) -> TokenResult<Claims> {
    verify_at(token, key, &VerifyOptions::default(), Utc::now())
}

fn verify_at(
    token: &str,
    key: &SecretKey,
    options: &VerifyOptions,
    now: DateTime<Utc>,
) -> TokenResult<Claims> {
    let segments = token.split('.').count();
    if segments != SEGMENT_COUNT {
        return Err(TokenError::MalformedToken(segments));
    }

    let (signing_input, signature) = token
        .rsplit_once('.')
        .ok_or(TokenError::MalformedToken(segments))?;
    let (header_b64, claims_b64) = signing_input
        .split_once('.')
        .ok_or(TokenError::MalformedToken(segments))?;

    if !hs256_verify(signing_input.as_bytes(), signature, key)? {
        return Err(TokenError::InvalidSignature);
    }

    let header: Header = codec::decode(header_b64)
        .ok()
        .and_then(|json| serde_json::from_slice(&json).ok())
        .ok_or(TokenError::UnsupportedHeader)?;
    if header != Header::hs256() {
        return Err(TokenError::UnsupportedHeader);
    }

    let claims_json = codec::decode(claims_b64)
        .map_err(|_| TokenError::malformed_claims("claims segment is not base64url"))?;
    let claims: Claims = serde_json::from_slice(&claims_json)
        .map_err(|e| TokenError::malformed_claims(&e.to_string()))?;
    claims
        .validate()
        .map_err(|e| TokenError::malformed_claims(&e.to_string()))?;

    // Raw `exp`, so values outside the calendar range still count.
    if options.require_exp && !claims.has_expiry() {
        return Err(TokenError::MissingExpiry);
    }
    if options.validate_exp && claims.is_expired_at(now, options.leeway) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Verifies presented tokens with a shared key
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: Arc<SecretKey>,
    options: VerifyOptions,
}

impl TokenVerifier {
    /// Create a verifier over `key` with default options
    #[must_use]
    pub fn new(key: Arc<SecretKey>) -> Self {
        Self {
            key,
            options: VerifyOptions::default(),
        }
    }

    /// Replace the verification options
    #[must_use]
    pub fn with_options(mut self, options: VerifyOptions) -> Self {
        self.options = options;
        self
    }

    /// Options in effect
    #[must_use]
    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Verify `token` and return its claims
    ///
    /// # Errors
    /// See [`verify`]; additionally `MissingExpiry` when expiry is required
    pub fn verify(&self, token: &str) -> TokenResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as of `now`
    ///
    /// # Errors
    /// Same as [`TokenVerifier::verify`]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> TokenResult<Claims> {
        verify_at(token, &self.key, &self.options, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;
    use crate::signer::TokenSigner;
    use crate::types::UnsignedToken;

    const SAMPLE_KEY: &str = "wn5ndJfLXR4lgPVK7VhcpG73TibKSiYUaRlSvRUw";

    fn key() -> Arc<SecretKey> {
        Arc::new(SecretKey::new(SAMPLE_KEY).unwrap())
    }

    fn signed_with_raw_claims(json: &str) -> String {
        let header = codec::encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let unsigned = UnsignedToken::from_segments(&header, &codec::encode(json));
        crate::signer::sign(unsigned, &key()).unwrap().into_string()
    }

    #[test]
    fn verifies_reference_token() {
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                     eyJyb2xlIjoiYWRtaW4iLCJ1dWlkIjoiMGY4ZmFkNWItZDljYi00NjlmLWExNjUtNzA4Njc3Mjg5NTBlIn0.\
                     eJyhh8myVCaJOjSjXyRBWfb88cf3yIDvGoCs0GdMXI8";
        let claims = verify(token, &key()).unwrap();
        assert_eq!(claims.role(), "admin");
        assert_eq!(claims.subject_id(), "0f8fad5b-d9cb-469f-a165-70867728950e");
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        for token in ["", "abc", "a.b", "a.b.c.d", "a.b.c.d.e", "...."] {
            assert!(
                matches!(verify(token, &key()), Err(TokenError::MalformedToken(_))),
                "{token:?}"
            );
        }
    }

    #[test]
    fn empty_segments_fail_signature() {
        assert_eq!(verify("..", &key()), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn rejects_foreign_header_even_when_signed() {
        let header = codec::encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = codec::encode(br#"{"role":"admin","uuid":"abc"}"#);
        let unsigned = UnsignedToken::from_segments(&header, &claims);
        let token = crate::signer::sign(unsigned, &key()).unwrap();
        assert_eq!(verify(token.as_str(), &key()), Err(TokenError::UnsupportedHeader));
    }

    #[test]
    fn rejects_signed_garbage_claims() {
        let token = signed_with_raw_claims("not json");
        assert!(matches!(verify(&token, &key()), Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn rejects_signed_non_base64_claims() {
        let header = codec::encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let unsigned = UnsignedToken::from_segments(&header, "not*base64!");
        let token = crate::signer::sign(unsigned, &key()).unwrap();
        assert!(matches!(
            verify(token.as_str(), &key()),
            Err(TokenError::MalformedClaims(_))
        ));
    }

    #[test]
    fn rejects_signed_non_base64_header() {
        let claims = codec::encode(br#"{"role":"admin","uuid":"abc"}"#);
        let unsigned = UnsignedToken::from_segments("not*base64!", &claims);
        let token = crate::signer::sign(unsigned, &key()).unwrap();
        assert_eq!(verify(token.as_str(), &key()), Err(TokenError::UnsupportedHeader));
    }

    #[test]
    fn out_of_range_expiry_is_expired() {
        let token =
            signed_with_raw_claims(r#"{"role":"admin","uuid":"abc","exp":-9223372036854775808}"#);
        assert_eq!(verify(&token, &key()), Err(TokenError::Expired));

        let strict = TokenVerifier::new(key())
            .with_options(VerifyOptions::default().require_expiry(true));
        assert_eq!(strict.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn rejects_signed_claims_with_extra_fields() {
        let token = signed_with_raw_claims(r#"{"role":"admin","uuid":"abc","scope":"all"}"#);
        assert!(matches!(verify(&token, &key()), Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn rejects_signed_claims_with_empty_role() {
        let token = signed_with_raw_claims(r#"{"role":"","uuid":"abc"}"#);
        assert!(matches!(verify(&token, &key()), Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::builder()
            .role("user")
            .subject_id("abc")
            .valid_between(issued, issued + Duration::hours(1))
            .build()
            .unwrap();
        let token = TokenSigner::new(key()).issue(&claims).unwrap();
        let verifier = TokenVerifier::new(key());

        let within = issued + Duration::minutes(30);
        assert_eq!(verifier.verify_at(token.as_str(), within).unwrap(), claims);

        let within_leeway = issued + Duration::hours(1) + Duration::seconds(30);
        assert!(verifier.verify_at(token.as_str(), within_leeway).is_ok());

        let after = issued + Duration::hours(2);
        assert_eq!(verifier.verify_at(token.as_str(), after), Err(TokenError::Expired));
    }

    #[test]
    fn expiry_can_be_required() {
        let claims = Claims::new("user", "abc").unwrap();
        let token = TokenSigner::new(key()).issue(&claims).unwrap();

        let lenient = TokenVerifier::new(key());
        assert!(lenient.verify(token.as_str()).is_ok());

        let strict = TokenVerifier::new(key())
            .with_options(VerifyOptions::default().require_expiry(true));
        assert_eq!(strict.verify(token.as_str()), Err(TokenError::MissingExpiry));
    }

    #[test]
    fn header_and_claims_segments_are_bound_by_signature() {
        let signer = TokenSigner::new(key());
        let user = signer.issue(&Claims::new("user", "abc").unwrap()).unwrap();
        let admin = builder::build(&Header::hs256(), &Claims::new("admin", "abc").unwrap()).unwrap();

        let (_, user_signature) = user.as_str().rsplit_once('.').unwrap();
        let forged = format!("{}.{}", admin.as_str(), user_signature);
        assert_eq!(verify(&forged, &key()), Err(TokenError::InvalidSignature));
    }
}
