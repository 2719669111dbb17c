//! Token cryptographic primitives

pub(crate) mod hmac_sha256;
