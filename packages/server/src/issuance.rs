//! Token issuance
//!
//! An identity goes in, one signed token comes out. Credential checking is
//! assumed to have happened before this point; the role comes from an
//! injected [`RolePolicy`].

use crate::error::{ServerError, ServerResult};
use chrono::Duration;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokenward_common::LoggingTransformer;
use tokenward_jwt::{Claims, SignedToken, TokenSigner};
use uuid::Uuid;

/// Identity submitted to the login endpoint
#[derive(Clone, Default, Deserialize)]
pub struct Identity {
    /// Subject name
    #[serde(default)]
    pub name: String,
    /// Credential hash placeholder
    #[serde(default)]
    pub hash: String,
}

impl Identity {
    /// Create an identity
    pub fn new(name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
        }
    }

    fn validate(&self) -> ServerResult<()> {
        if self.name.is_empty() {
            return Err(ServerError::invalid_identity("name is required"));
        }
        if self.hash.is_empty() {
            return Err(ServerError::invalid_identity("hash is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("name", &LoggingTransformer::secure_hash(&self.name))
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

/// Maps an identity to the role its token will carry
pub trait RolePolicy: Send + Sync + 'static {
    /// Role for `identity`
    fn role_for(&self, identity: &Identity) -> String;
}

impl<F> RolePolicy for F
where
    F: Fn(&Identity) -> String + Send + Sync + 'static,
{
    fn role_for(&self, identity: &Identity) -> String {
        self(identity)
    }
}

/// One distinguished subject gets the elevated role, everyone else the baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedSubjectPolicy {
    subject: String,
    elevated_role: String,
    baseline_role: String,
}

impl DistinguishedSubjectPolicy {
    /// Create a policy elevating `subject`
    pub fn new(
        subject: impl Into<String>,
        elevated_role: impl Into<String>,
        baseline_role: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            elevated_role: elevated_role.into(),
            baseline_role: baseline_role.into(),
        }
    }

    /// Name of the distinguished subject
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Role granted to the distinguished subject
    #[must_use]
    pub fn elevated_role(&self) -> &str {
        &self.elevated_role
    }

    /// Role granted to everyone else
    #[must_use]
    pub fn baseline_role(&self) -> &str {
        &self.baseline_role
    }
}

impl Default for DistinguishedSubjectPolicy {
    fn default() -> Self {
        Self::new("bob", "admin", "user")
    }
}

impl RolePolicy for DistinguishedSubjectPolicy {
    fn role_for(&self, identity: &Identity) -> String {
        if identity.name == self.subject {
            self.elevated_role.clone()
        } else {
            self.baseline_role.clone()
        }
    }
}

/// Mints tokens for submitted identities
#[derive(Clone)]
pub struct Issuer {
    signer: TokenSigner,
    policy: Arc<dyn RolePolicy>,
    lifetime: Option<Duration>,
}

impl Issuer {
    /// Create an issuer signing with `signer` and deriving roles from `policy`
    pub fn new(signer: TokenSigner, policy: Arc<dyn RolePolicy>) -> Self {
        Self {
            signer,
            policy,
            lifetime: None,
        }
    }

    /// Stamp `iat`/`exp` on every token, expiring `lifetime` after issuance
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Issue a token for `identity` under a fresh subject id
    ///
    /// # Errors
    /// - `InvalidIdentity` if the name or hash is empty
    /// - `Token(InvalidClaims)` if the policy yields an empty role or the
    ///   lifetime puts the expiry out of range
    pub fn issue(&self, identity: &Identity) -> ServerResult<SignedToken> {
        identity.validate()?;

        let role = self.policy.role_for(identity);
        let subject_id = Uuid::new_v4().to_string();

        let builder = Claims::builder().role(role).subject_id(subject_id);
        let claims = match self.lifetime {
            Some(lifetime) => builder.lifetime(lifetime)?.build()?,
            None => builder.build()?,
        };

        let token = self
            .signer
            .issue(&claims)
            .inspect_err(|err| LoggingTransformer::log_crypto_error("sign", err))?;
        LoggingTransformer::log_auth_event("token issued", Some(&identity.name), true);
        tracing::debug!(role = claims.role(), "Issued token");
        Ok(token)
    }
}

impl fmt::Debug for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issuer")
            .field("signer", &self.signer)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
