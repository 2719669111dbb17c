//! Application state shared across handlers

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::gate::AuthorizationGate;
use crate::issuance::Issuer;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokenward_jwt::{SecretKey, TokenSigner, TokenVerifier, VerifyOptions};

/// Issuer and gate, both keyed from the same secret
#[derive(Debug, Clone)]
pub struct AppState {
    issuer: Arc<Issuer>,
    gate: Arc<AuthorizationGate>,
}

impl AppState {
    /// Assemble state from already constructed parts
    pub fn new(issuer: Issuer, gate: AuthorizationGate) -> Self {
        Self {
            issuer: Arc::new(issuer),
            gate: Arc::new(gate),
        }
    }

    /// Load the signing key once and build the issuer and gate around it
    ///
    /// # Errors
    /// Returns `ServerError::Config` if the configuration is invalid and
    /// `ServerError::Token` if the key is rejected
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let key = Arc::new(SecretKey::new(config.secret.expose_secret().as_bytes())?);

        let issuer = Issuer::new(TokenSigner::new(key.clone()), Arc::new(config.policy.clone()))
            .with_lifetime(config.token_ttl);

        let options = VerifyOptions::default()
            .with_leeway(config.leeway)
            .require_expiry(config.token_ttl.is_some());
        let gate = AuthorizationGate::new(TokenVerifier::new(key).with_options(options));

        Ok(Self::new(issuer, gate))
    }

    /// Token issuer
    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    /// Authorization gate
    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use crate::issuance::Identity;
    use chrono::Duration;

    #[test]
    fn issues_with_configured_lifetime() {
        let config = ServerConfig::new("state-test-key-with-plenty-of-bytes")
            .with_token_ttl(Duration::minutes(5));
        let state = AppState::from_config(&config).unwrap();
        let token = state.issuer().issue(&Identity::new("bob", "h")).unwrap();
        assert!(state.gate().authorize(token.as_str()).is_authorized());
    }

    #[test]
    fn rejects_lifetime_beyond_cap() {
        let config = ServerConfig::new("state-test-key-with-plenty-of-bytes")
            .with_token_ttl(Duration::seconds(9_223_372_036_854_775));
        assert!(matches!(
            AppState::from_config(&config),
            Err(ServerError::Config(_))
        ));
    }
}
