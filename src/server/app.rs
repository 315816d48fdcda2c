use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::dto::{StatsResponse, StatusResponse};
use crate::server::response::ApiError;

pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusResponse {
        redis: state.auth.sessions().is_alive(),
        db: state.store.is_alive(),
    })
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let users = state.store.count_users()?;
    let files = state.store.count_files()?;

    Ok::<_, ApiError>(Json(StatsResponse { users, files }))
}
