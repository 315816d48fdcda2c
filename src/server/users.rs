use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{CreateUserRequest, UserResponse};
use crate::server::extract::ApiJson;
use crate::server::response::ApiError;

pub async fn post_new(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> impl IntoResponse {
    let user = state
        .auth
        .register(req.email.as_deref(), req.password.as_deref())?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn get_me(auth: RequireUser, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let user = state.auth.current_user(&auth.token)?;

    Ok::<_, ApiError>(Json(UserResponse::from(user)))
}
