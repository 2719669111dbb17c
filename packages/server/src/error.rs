//! Server error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokenward_jwt::TokenError;

/// Server operation result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Failures surfaced by issuance, configuration and process bootstrap
///
/// Verification failures never reach this type; the authorization gate
/// collapses them into a plain deny.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Startup configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
    /// Submitted identity is incomplete
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),
    /// Token construction failed
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Socket or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        ServerError::Config(msg.into())
    }

    /// Create an invalid identity error
    #[must_use]
    pub fn invalid_identity(msg: impl Into<String>) -> Self {
        ServerError::InvalidIdentity(msg.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidIdentity(_) | ServerError::Token(TokenError::InvalidClaims(_)) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Config(_) | ServerError::Token(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Server error occurred");
            (status, "internal server error").into_response()
        } else {
            tracing::debug!(error = %self, status = %status, "Client error occurred");
            (status, self.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_claims_errors_are_client_errors() {
        assert_eq!(
            ServerError::invalid_identity("name is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::from(TokenError::invalid_claims("role is required")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn everything_else_is_a_server_error() {
        assert_eq!(
            ServerError::config("missing secret").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::from(TokenError::invalid_key("Invalid HMAC key")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_error_body_hides_details() {
        let response = ServerError::config("secret file /etc/key unreadable").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
