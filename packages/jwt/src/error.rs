//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Failures raised while building, signing or verifying a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Claims are missing a required field and must not be signed
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),
    /// Input is not valid unpadded base64url
    #[error("Malformed base64url encoding")]
    MalformedEncoding,
    /// Token does not consist of exactly three `.`-separated segments
    #[error("Malformed token: expected 3 segments, found {0}")]
    MalformedToken(usize),
    /// Claims segment is not a valid claims document
    #[error("Malformed claims: {0}")]
    MalformedClaims(String),
    /// Signature does not match the signing input
    #[error("Invalid token signature")]
    InvalidSignature,
    /// Header is authentic but not the header this codec issues
    #[error("Unsupported token header")]
    UnsupportedHeader,
    /// Token expiry is in the past
    #[error("Token has expired")]
    Expired,
    /// Expiry is required but the token carries none
    #[error("Token carries no expiry")]
    MissingExpiry,
    /// Key material is unusable
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TokenError {
    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: &str) -> Self {
        TokenError::InvalidClaims(msg.to_string())
    }

    /// Create a malformed claims error
    #[inline]
    #[must_use]
    pub fn malformed_claims(msg: &str) -> Self {
        TokenError::MalformedClaims(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        TokenError::InvalidKey(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        TokenError::Serialization(msg.to_string())
    }

    /// Stable name of the variant, safe to log
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::InvalidClaims(_) => "InvalidClaims",
            TokenError::MalformedEncoding => "MalformedEncoding",
            TokenError::MalformedToken(_) => "MalformedToken",
            TokenError::MalformedClaims(_) => "MalformedClaims",
            TokenError::InvalidSignature => "InvalidSignature",
            TokenError::UnsupportedHeader => "UnsupportedHeader",
            TokenError::Expired => "Expired",
            TokenError::MissingExpiry => "MissingExpiry",
            TokenError::InvalidKey(_) => "InvalidKey",
            TokenError::Serialization(_) => "Serialization",
        }
    }

    /// Whether this error can only arise while verifying a presented token
    #[must_use]
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedEncoding
                | TokenError::MalformedToken(_)
                | TokenError::MalformedClaims(_)
                | TokenError::InvalidSignature
                | TokenError::UnsupportedHeader
                | TokenError::Expired
                | TokenError::MissingExpiry
        )
    }
}
