use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::Error;
use crate::server::AppState;

/// Header carrying the session token on authenticated requests.
pub const TOKEN_HEADER: &str = "x-token";

/// Extractor that requires a live session.
pub struct RequireUser {
    pub user_id: String,
    pub token: String,
}

/// Extractor for routes where identity is consulted only sometimes. A missing or
/// dead token yields `None` rather than a rejection.
pub struct OptionalUser(pub Option<String>);

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Unavailable,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken | AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            AuthError::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<Error> for AuthError {
    fn from(e: Error) -> Self {
        match e {
            Error::Unauthorized => AuthError::InvalidToken,
            Error::Unavailable(_) | Error::Database(_) => {
                tracing::error!("session lookup failed: {e}");
                AuthError::Unavailable
            }
            other => {
                tracing::error!("session lookup failed: {other}");
                AuthError::InternalError
            }
        }
    }
}

/// Reads the raw session token from the request, if any.
pub fn token_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AuthError::MissingToken)?;
        let user_id = state.auth.resolve(&token)?;

        Ok(RequireUser { user_id, token })
    }
}

impl FromRequestParts<Arc<AppState>> for OptionalUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_parts(parts) else {
            return Ok(OptionalUser(None));
        };

        match state.auth.resolve(&token) {
            Ok(user_id) => Ok(OptionalUser(Some(user_id))),
            Err(Error::Unauthorized) => Ok(OptionalUser(None)),
            Err(e) => Err(e.into()),
        }
    }
}
