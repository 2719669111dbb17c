//! Authorization gate for the protected resource

use tokenward_common::LoggingTransformer;
use tokenward_jwt::{Claims, TokenVerifier};

const BEARER_SCHEME: &str = "bearer ";

/// Outcome of presenting a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Token verified; carries its claims
    Authorized(Claims),
    /// Token rejected for any reason
    Unauthorized,
}

impl AuthDecision {
    /// Whether access is granted
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthDecision::Authorized(_))
    }

    /// Claims of an authorized token
    #[must_use]
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            AuthDecision::Authorized(claims) => Some(claims),
            AuthDecision::Unauthorized => None,
        }
    }
}

/// Pick the candidate token from a request
///
/// The `Authorization` header wins over the `bearer` query parameter. Empty
/// values count as absent, and a leading `Bearer ` scheme on the header is
/// dropped.
#[must_use]
pub fn extract_candidate<'a>(
    authorization: Option<&'a str>,
    bearer_query: Option<&'a str>,
) -> Option<&'a str> {
    let from_header = authorization
        .map(strip_bearer_scheme)
        .map(str::trim)
        .filter(|token| !token.is_empty());

    from_header.or_else(|| bearer_query.map(str::trim).filter(|token| !token.is_empty()))
}

fn strip_bearer_scheme(value: &str) -> &str {
    match value.get(..BEARER_SCHEME.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_SCHEME) => &value[BEARER_SCHEME.len()..],
        _ => value,
    }
}

/// Decides allow/deny for presented tokens
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    verifier: TokenVerifier,
}

impl AuthorizationGate {
    /// Create a gate backed by `verifier`
    #[must_use]
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Verify `candidate` and decide
    ///
    /// Every verification failure becomes `Unauthorized`; the reason is only
    /// logged locally.
    #[must_use]
    pub fn authorize(&self, candidate: &str) -> AuthDecision {
        match self.verifier.verify(candidate) {
            Ok(claims) => AuthDecision::Authorized(claims),
            Err(err) => {
                LoggingTransformer::log_token_rejected(err.kind());
                AuthDecision::Unauthorized
            }
        }
    }
}
