//! Startup configuration
//!
//! Flags fall back to `TOKENWARD_*` environment variables. The signing key
//! has no default and must come from `--secret` or `--secret-file`.

use crate::error::{ServerError, ServerResult};
use crate::issuance::DistinguishedSubjectPolicy;
use chrono::Duration;
use clap::Parser;
use secrecy::{ExposeSecret, SecretString};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
/// Default clock skew tolerance for token expiry
pub const DEFAULT_LEEWAY_SECS: u64 = 60;
/// Longest token lifetime accepted, one year
pub const MAX_TOKEN_TTL_SECS: u64 = 366 * 24 * 60 * 60;

/// Command line of the `tokenward` binary
#[derive(Debug, Parser)]
#[command(name = "tokenward", version, about = "Issues HS256 access tokens and gates a protected resource")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "TOKENWARD_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Token signing key
    #[arg(long, env = "TOKENWARD_SECRET", hide_env_values = true, conflicts_with = "secret_file")]
    pub secret: Option<String>,

    /// File containing the token signing key
    #[arg(long, env = "TOKENWARD_SECRET_FILE")]
    pub secret_file: Option<PathBuf>,

    /// Subject name granted the elevated role
    #[arg(long, env = "TOKENWARD_ELEVATED_SUBJECT", default_value = "bob")]
    pub elevated_subject: String,

    /// Role granted to the elevated subject
    #[arg(long, env = "TOKENWARD_ELEVATED_ROLE", default_value = "admin")]
    pub elevated_role: String,

    /// Role granted to everyone else
    #[arg(long, env = "TOKENWARD_BASELINE_ROLE", default_value = "user")]
    pub baseline_role: String,

    /// Token lifetime in seconds; tokens never expire when unset
    #[arg(long, env = "TOKENWARD_TOKEN_TTL_SECS")]
    pub token_ttl_secs: Option<u64>,

    /// Clock skew tolerated when checking expiry, in seconds
    #[arg(long, env = "TOKENWARD_LEEWAY_SECS", default_value_t = DEFAULT_LEEWAY_SECS)]
    pub leeway_secs: u64,
}

impl Cli {
    /// Resolve the signing key and validate everything else
    ///
    /// # Errors
    /// Returns `ServerError::Config` when no usable key is configured or a
    /// value is out of range, and `ServerError::Io` when the key file cannot
    /// be read
    pub fn into_config(self) -> ServerResult<ServerConfig> {
        let secret = match (self.secret, self.secret_file) {
            (Some(secret), _) => SecretString::from(secret),
            (None, Some(path)) => read_secret_file(&path)?,
            (None, None) => {
                return Err(ServerError::config(
                    "a signing key is required: pass --secret or --secret-file",
                ));
            }
        };

        let config = ServerConfig {
            bind: self.bind,
            secret,
            policy: DistinguishedSubjectPolicy::new(
                self.elevated_subject,
                self.elevated_role,
                self.baseline_role,
            ),
            token_ttl: self.token_ttl_secs.map(seconds).transpose()?,
            leeway: seconds(self.leeway_secs)?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Validated server configuration
#[derive(Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Token signing key
    pub secret: SecretString,
    /// Role derivation policy
    pub policy: DistinguishedSubjectPolicy,
    /// Token lifetime; `None` issues tokens without `iat`/`exp`
    pub token_ttl: Option<Duration>,
    /// Clock skew tolerated when checking expiry
    pub leeway: Duration,
}

impl ServerConfig {
    /// Configuration with defaults and the given signing key
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            secret: SecretString::from(secret.into()),
            policy: DistinguishedSubjectPolicy::default(),
            token_ttl: None,
            leeway: Duration::seconds(60),
        }
    }

    /// Set the listen address
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Set the token lifetime
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Set the role derivation policy
    #[must_use]
    pub fn with_policy(mut self, subject: &str, elevated_role: &str, baseline_role: &str) -> Self {
        self.policy = DistinguishedSubjectPolicy::new(subject, elevated_role, baseline_role);
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `ServerError::Config` describing the first problem found
    pub fn validate(&self) -> ServerResult<()> {
        if self.secret.expose_secret().is_empty() {
            return Err(ServerError::config("signing key must not be empty"));
        }
        if self.policy.subject().is_empty() {
            return Err(ServerError::config("elevated subject must not be empty"));
        }
        if self.policy.elevated_role().is_empty() || self.policy.baseline_role().is_empty() {
            return Err(ServerError::config("roles must not be empty"));
        }
        if let Some(ttl) = self.token_ttl {
            if ttl <= Duration::zero() {
                return Err(ServerError::config("token lifetime must be positive"));
            }
            if ttl > Duration::seconds(MAX_TOKEN_TTL_SECS as i64) {
                return Err(ServerError::config(format!(
                    "token lifetime must not exceed {MAX_TOKEN_TTL_SECS} seconds"
                )));
            }
        }
        Ok(())
    }
}

fn seconds(secs: u64) -> ServerResult<Duration> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| ServerError::config(format!("{secs} seconds is out of range")))
}

fn read_secret_file(path: &Path) -> ServerResult<SecretString> {
    let contents = Zeroizing::new(std::fs::read_to_string(path)?);
    let trimmed = contents.trim_end_matches(['\r', '\n']);
    Ok(SecretString::from(trimmed.to_string()))
}
