//! Header and token string types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed token header
///
/// Field order is the serialization order: `{"alg":"HS256","typ":"JWT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    alg: String,
    typ: String,
}

impl Header {
    /// Signing algorithm identifier (HMAC with SHA-256)
    pub const ALGORITHM: &'static str = "HS256";
    /// Artifact type identifier
    pub const TYPE: &'static str = "JWT";

    /// The only header this codec issues or accepts
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            alg: Self::ALGORITHM.to_string(),
            typ: Self::TYPE.to_string(),
        }
    }

    /// Algorithm identifier
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.alg
    }

    /// Artifact type
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.typ
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::hs256()
    }
}

/// `header.claims`, ready to be signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedToken(String);

impl UnsignedToken {
    pub(crate) fn from_segments(header: &str, claims: &str) -> Self {
        Self(format!("{header}.{claims}"))
    }

    /// The signing input
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnsignedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnsignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `header.claims.signature`, the string handed to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    pub(crate) fn from_parts(unsigned: UnsignedToken, signature: &str) -> Self {
        let mut token = unsigned.0;
        token.reserve(signature.len() + 1);
        token.push('.');
        token.push_str(signature);
        Self(token)
    }

    /// Token as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SignedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SignedToken> for String {
    fn from(token: SignedToken) -> Self {
        token.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
