//! Compact HS256 signed tokens
//!
//! This crate builds, signs and verifies `header.claims.signature` tokens:
//! - Base64url codec without padding
//! - Closed claims model (`role`, `uuid`, optional `iat`/`exp`)
//! - HMAC-SHA256 signing with constant-time verification
//!
//! Claims can only be read back through [`verify`] or [`TokenVerifier`];
//! there is no decode-without-verify entry point.
//!
//! ```
//! use std::sync::Arc;
//! use tokenward_jwt::{Claims, SecretKey, TokenSigner, TokenVerifier};
//!
//! # fn main() -> Result<(), tokenward_jwt::TokenError> {
//! let key = Arc::new(SecretKey::new("a-signing-key-of-at-least-32-bytes!")?);
//! let token = TokenSigner::new(key.clone()).issue(&Claims::new("user", "42")?)?;
//! let claims = TokenVerifier::new(key).verify(token.as_str())?;
//! assert_eq!(claims.role(), "user");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod claims;
pub mod codec;
pub(crate) mod crypto;
mod error;
mod key;
pub mod signer;
mod types;
pub mod verifier;

pub use builder::build;
pub use claims::{Claims, ClaimsBuilder};
pub use error::*;
pub use key::{RECOMMENDED_KEY_LEN, SecretKey};
pub use signer::{TokenSigner, sign};
pub use types::{Header, SignedToken, UnsignedToken};
pub use verifier::{TokenVerifier, VerifyOptions, verify};
