//! HTTP handlers

use crate::error::ServerResult;
use crate::gate::{AuthDecision, extract_candidate};
use crate::issuance::Identity;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokenward_common::LoggingTransformer;

/// Body returned by the protected resource
pub const PROTECTED_PAYLOAD: &str = "Here is your data.";

/// POST /api/login
///
/// Issues a token for the submitted identity and returns it as the raw body.
pub async fn login(
    State(state): State<AppState>,
    Json(identity): Json<Identity>,
) -> ServerResult<String> {
    let token = state.issuer().issue(&identity)?;
    Ok(token.into_string())
}

/// Query parameters accepted by the protected resource
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    /// Token passed in the URL instead of the `Authorization` header
    pub bearer: Option<String>,
}

/// GET /api/data
///
/// 200 with the payload for a valid token, 401 for any rejected token, 400
/// when no token was presented. A query string that does not parse is treated
/// as carrying no `bearer` value, so it never overrides the header.
pub async fn data(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> Response {
    let authorization = match headers.get(header::AUTHORIZATION).map(HeaderValue::to_str) {
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => {
            // Presented but unreadable.
            LoggingTransformer::log_token_rejected("UnreadableHeader");
            return unauthorized();
        }
        None => None,
    };
    let bearer = match &query {
        Ok(Query(query)) => query.bearer.as_deref(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Ignoring unparsable query string");
            None
        }
    };

    let Some(candidate) = extract_candidate(authorization, bearer) else {
        return (StatusCode::BAD_REQUEST, "missing token").into_response();
    };

    match state.gate().authorize(candidate) {
        AuthDecision::Authorized(claims) => {
            tracing::debug!(role = claims.role(), "Protected resource served");
            PROTECTED_PAYLOAD.into_response()
        }
        AuthDecision::Unauthorized => unauthorized(),
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
