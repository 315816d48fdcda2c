use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::server::response::ApiError;

pub const INVALID_BODY: &str = "Invalid body";

/// JSON body extractor whose failures stay inside the `{"error": ...}` contract.
///
/// A body that is absent, not declared as JSON, or not parseable as JSON reads as
/// `T::default()`, so the handler's own validation names the missing field. JSON
/// whose fields have the wrong shape is rejected with 400 without echoing the
/// deserializer's message.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::MissingJsonContentType(_) | JsonRejection::JsonSyntaxError(_)) => {
                Ok(ApiJson(T::default()))
            }
            Err(rejection) => {
                tracing::debug!("rejected request body: {rejection}");
                Err(ApiError::bad_request(INVALID_BODY))
            }
        }
    }
}
