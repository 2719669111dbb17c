//! Structured logging bootstrap
//!
//! Provides env_logger-based logging with secure handling of subject
//! identifiers. Crates in this workspace emit through `tracing` with its `log`
//! feature, so events land here without a dedicated subscriber.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::net::SocketAddr;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Process-wide logging setup and secure log helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at startup)
    ///
    /// Levels come from `RUST_LOG`, defaulting to `info`:
    /// - `RUST_LOG=debug` - include rejected-token reasons
    /// - `RUST_LOG=tokenward_server=debug,axum=warn` - module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; repeated initialization is ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log server startup
    pub fn log_server_startup(addr: &SocketAddr) {
        info!("HTTP server listening on {addr}");
    }

    /// Log an authentication event
    ///
    /// Subject identifiers are hashed so the log stays traceable without
    /// recording who the subject is.
    pub fn log_auth_event(event: &str, subject: Option<&str>, success: bool) {
        if success {
            let subject_hash = subject.map_or_else(|| "anonymous".to_string(), Self::secure_hash);
            info!("Authentication succeeded: {event} (subject_hash: {subject_hash})");
        } else {
            warn!("Authentication failed: {event}");
        }
    }

    /// Log a rejected token
    ///
    /// Only the rejection kind is recorded, never the token itself.
    pub fn log_token_rejected(kind: &str) {
        debug!("Token rejected: {kind}");
    }

    /// Log a failed cryptographic operation without exposing its inputs
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        error!(
            "Cryptographic operation failed: {} (error_type: {})",
            operation,
            std::any::type_name_of_val(error)
        );
    }

    /// SHA-256 fingerprint used in place of sensitive values
    ///
    /// Returns `#` followed by the first 12 hex characters of the digest.
    pub fn secure_hash(value: &str) -> String {
        let digest = Sha256::digest(value.as_bytes());
        let hex_digest = hex::encode(digest);
        format!("#{}", &hex_digest[..12])
    }
}
