use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use files_manager::cache::MemoryCache;
use files_manager::files::ContentStorage;
use files_manager::server::{AppState, create_router};
use files_manager::store::{SqliteStore, Store};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

/// In-process server over a temp-dir database, temp content root and memory cache.
pub struct TestApp {
    pub temp_dir: TempDir,
    pub state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");

        let store = SqliteStore::new(temp_dir.path().join("files_manager.db")).expect("open store");
        store.initialize().expect("initialize store");

        let state = Arc::new(AppState::new(
            Arc::new(store),
            Arc::new(MemoryCache::new()),
            ContentStorage::new(temp_dir.path().join("content")),
        ));
        let router = create_router(state.clone());

        Self {
            temp_dir,
            state,
            router,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        match body {
            Some(json) => {
                let mut headers = headers.to_vec();
                headers.push(("Content-Type", "application/json"));
                self.request_raw(method, uri, &headers, json.to_string()).await
            }
            None => self.request_raw(method, uri, headers, String::new()).await,
        }
    }

    /// Sends `body` as is, with only the given headers.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::from(body)).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        match token {
            Some(token) => self.request(Method::GET, uri, &[("X-Token", token)], None).await,
            None => self.request(Method::GET, uri, &[], None).await,
        }
    }

    pub async fn put(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::PUT, uri, &[("X-Token", token)], None)
            .await
    }

    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/users",
            &[],
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn connect(&self, email: &str, password: &str) -> TestResponse {
        let header = basic_auth(email, password);
        self.request(Method::GET, "/connect", &[("Authorization", header.as_str())], None)
            .await
    }

    /// Registers a user and logs in, returning the session token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let registered = self.register(email, password).await;
        assert_eq!(registered.status, StatusCode::CREATED);

        let connected = self.connect(email, password).await;
        assert_eq!(connected.status, StatusCode::OK);
        connected.json()["token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    pub async fn upload(&self, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, "/files", &[("X-Token", token)], Some(body))
            .await
    }

    /// Uploads and returns the new record id, asserting success.
    pub async fn upload_ok(&self, token: &str, body: Value) -> String {
        let response = self.upload(token, body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.json());
        response.json()["id"].as_str().expect("id").to_string()
    }
}

pub fn basic_auth(login: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
}
