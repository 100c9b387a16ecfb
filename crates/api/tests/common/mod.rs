#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use projectsync_core::service::ProjectService;
use projectsync_core::store::{MemoryProjectStore, ProjectStore};
use tower::ServiceExt;

use projectsync_api::config::{CorsOrigins, LogFormat, ServerConfig, StoreBackend};
use projectsync_api::router::build_app_router;
use projectsync_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store: StoreBackend::Memory,
        static_dir: None,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over the given store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_app_with(store: Arc<dyn ProjectStore>, config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        projects: ProjectService::new(store),
    };
    build_app_router(state, &config)
}

/// Router over a shared in-memory store. Clone the store to build several
/// apps that see the same data.
pub fn build_test_app(store: Arc<MemoryProjectStore>) -> Router {
    build_app_with(store, test_config())
}

pub fn new_store() -> Arc<MemoryProjectStore> {
    Arc::new(MemoryProjectStore::new())
}

pub fn config_with_static_dir(dir: PathBuf) -> ServerConfig {
    ServerConfig {
        static_dir: Some(dir),
        ..test_config()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PATCH", uri, body.to_string()).await
}

/// Send a raw string body with a JSON content type.
pub async fn send_json(app: Router, method: &str, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
