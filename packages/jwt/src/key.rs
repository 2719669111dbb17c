//! Signing key material

use crate::error::{TokenError, TokenResult};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum key length recommended for HS256, in bytes
pub const RECOMMENDED_KEY_LEN: usize = 32;

/// Symmetric HMAC key used for both signing and verification
///
/// Constructed once from configuration and shared read-only. The bytes are
/// wiped on drop and never appear in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wrap raw key bytes
    ///
    /// Keys shorter than [`RECOMMENDED_KEY_LEN`] are accepted with a warning.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` for an empty key
    pub fn new(bytes: impl Into<Vec<u8>>) -> TokenResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TokenError::invalid_key("signing key must not be empty"));
        }
        if bytes.len() < RECOMMENDED_KEY_LEN {
            tracing::warn!(
                len = bytes.len(),
                recommended = RECOMMENDED_KEY_LEN,
                "Signing key is shorter than recommended"
            );
        }
        Ok(Self { bytes })
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty keys are rejected at construction
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}
