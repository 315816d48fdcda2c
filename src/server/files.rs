use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::auth::{OptionalUser, RequireUser};
use crate::files::FileDraft;
use crate::server::AppState;
use crate::server::dto::ListFilesParams;
use crate::server::extract::ApiJson;
use crate::server::response::ApiError;
use crate::types::ParentRef;

pub async fn post_upload(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<FileDraft>,
) -> impl IntoResponse {
    let record = state.files.create(&auth.user_id, draft).await?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(record)))
}

pub async fn get_show(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let record = state.files.get_owned(&auth.user_id, &id)?;

    Ok::<_, ApiError>(Json(record))
}

pub async fn get_index(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListFilesParams>,
) -> impl IntoResponse {
    let parent = params
        .parent_id
        .as_deref()
        .map_or(ParentRef::Root, ParentRef::from_query);

    let records = state.files.list(&parent, params.page())?;

    Ok::<_, ApiError>(Json(records))
}

pub async fn put_publish(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let record = state.files.publish(&auth.user_id, &id)?;

    Ok::<_, ApiError>(Json(record))
}

pub async fn put_unpublish(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let record = state.files.unpublish(&auth.user_id, &id)?;

    Ok::<_, ApiError>(Json(record))
}

pub async fn get_file(
    OptionalUser(viewer): OptionalUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let content = state.files.read_content(viewer.as_deref(), &id).await?;

    let content_type = HeaderValue::from_str(&content.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("text/plain"));

    Ok::<_, ApiError>((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        content.bytes,
    ))
}
