//! Token claims and a builder with compile-time required fields.

use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Typestate markers for the claims builder.
pub mod ts {
    /// Marker for a field that has been set.
    pub struct Set;
    /// Marker for a field that has not been set.
    pub struct Unset;
}

/// Facts a token asserts about its subject.
///
/// Wire form is `{"role":…,"uuid":…}`, followed by `iat`/`exp` only when a
/// lifetime was attached. Unknown fields are rejected on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    role: String,
    #[serde(rename = "uuid")]
    subject_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

impl Claims {
    /// Claims for `subject_id` holding `role`.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` if either value is empty
    pub fn new(role: impl Into<String>, subject_id: impl Into<String>) -> TokenResult<Self> {
        Self::builder().role(role).subject_id(subject_id).build()
    }

    /// Start a claims builder.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Authorization level.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Opaque identifier assigned at issuance.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Issuance time, when a lifetime was attached.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Expiry time, when a lifetime was attached.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Whether an expiry was attached, representable or not.
    #[must_use]
    pub fn has_expiry(&self) -> bool {
        self.exp.is_some()
    }

    /// Whether the claims are past expiry at `now`, allowing `leeway` of skew.
    ///
    /// Claims without an expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        match self.exp {
            Some(exp) => exp.saturating_add(leeway.num_seconds()) < now.timestamp(),
            None => false,
        }
    }

    /// Check the required-field invariant.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` naming the first empty field
    pub fn validate(&self) -> TokenResult<()> {
        if self.role.is_empty() {
            return Err(TokenError::invalid_claims("role is required"));
        }
        if self.subject_id.is_empty() {
            return Err(TokenError::invalid_claims("subject id is required"));
        }
        if let (Some(iat), Some(exp)) = (self.iat, self.exp)
            && exp < iat
        {
            return Err(TokenError::invalid_claims("expiry precedes issuance"));
        }
        Ok(())
    }
}

/// Compile-time checked builder for claims.
pub struct ClaimsBuilder<Role = ts::Unset, Subject = ts::Unset> {
    role: Option<String>,
    subject_id: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
    _phantom: PhantomData<(Role, Subject)>,
}

impl ClaimsBuilder {
    /// Create a new claims builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            role: None,
            subject_id: None,
            iat: None,
            exp: None,
            _phantom: PhantomData,
        }
    }
}

impl Default for ClaimsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Subject> ClaimsBuilder<ts::Unset, Subject> {
    /// Set the role.
    pub fn role(self, role: impl Into<String>) -> ClaimsBuilder<ts::Set, Subject> {
        ClaimsBuilder {
            role: Some(role.into()),
            subject_id: self.subject_id,
            iat: self.iat,
            exp: self.exp,
            _phantom: PhantomData,
        }
    }
}

impl<Role> ClaimsBuilder<Role, ts::Unset> {
    /// Set the subject identifier.
    pub fn subject_id(self, subject_id: impl Into<String>) -> ClaimsBuilder<Role, ts::Set> {
        ClaimsBuilder {
            role: self.role,
            subject_id: Some(subject_id.into()),
            iat: self.iat,
            exp: self.exp,
            _phantom: PhantomData,
        }
    }
}

impl<Role, Subject> ClaimsBuilder<Role, Subject> {
    /// Stamp issuance at `now` and expiry `lifetime` later.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` if the expiry is not representable
    pub fn lifetime(self, lifetime: Duration) -> TokenResult<Self> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| TokenError::invalid_claims("lifetime is out of range"))?;
        Ok(self.valid_between(now, expires_at))
    }

    /// Stamp explicit issuance and expiry times.
    #[must_use]
    pub fn valid_between(mut self, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        self.iat = Some(issued_at.timestamp());
        self.exp = Some(expires_at.timestamp());
        self
    }
}

impl ClaimsBuilder<ts::Set, ts::Set> {
    /// Build the claims.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` if a required value is empty
    pub fn build(self) -> TokenResult<Claims> {
        let claims = Claims {
            role: self.role.unwrap_or_default(),
            subject_id: self.subject_id.unwrap_or_default(),
            iat: self.iat,
            exp: self.exp,
        };
        claims.validate()?;
        Ok(claims)
    }
}
