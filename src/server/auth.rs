use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
};

use crate::auth::{RequireUser, parse_basic_credentials};
use crate::server::AppState;
use crate::server::dto::TokenResponse;
use crate::server::response::ApiError;

pub async fn get_connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let credentials = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_basic_credentials)
        .ok_or_else(ApiError::unauthorized)?;

    let token = state.auth.login(&credentials)?;

    Ok::<_, ApiError>(Json(TokenResponse { token }))
}

pub async fn get_disconnect(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    state.auth.logout(&auth.token)?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
