use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post, put},
};

use super::{app, auth, files, users};
use crate::auth::{AuthService, SessionStore};
use crate::cache::Cache;
use crate::files::{ContentStorage, FileService};
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: AuthService,
    pub files: FileService,
}

impl AppState {
    /// Wires the services over explicitly constructed adapters.
    pub fn new(store: Arc<dyn Store>, cache: Arc<dyn Cache>, content: ContentStorage) -> Self {
        Self {
            auth: AuthService::new(store.clone(), SessionStore::new(cache)),
            files: FileService::new(store.clone(), content),
            store,
        }
    }

    /// Closes both adapters. Requests arriving afterwards fail as unavailable.
    pub fn close(&self) -> crate::error::Result<()> {
        self.auth.sessions().close()?;
        self.store.close()
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(app::get_status))
        .route("/stats", get(app::get_stats))
        .route("/connect", get(auth::get_connect))
        .route("/disconnect", get(auth::get_disconnect))
        .route("/users", post(users::post_new))
        .route("/users/me", get(users::get_me))
        .route("/files", post(files::post_upload).get(files::get_index))
        .route("/files/{id}", get(files::get_show))
        .route("/files/{id}/publish", put(files::put_publish))
        .route("/files/{id}/unpublish", put(files::put_unpublish))
        .route("/files/{id}/data", get(files::get_file))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
