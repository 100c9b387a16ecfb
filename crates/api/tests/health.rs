//! Tests for the root-level `/health` endpoint.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use projectsync_api::config::StoreBackend;
use projectsync_core::error::StoreError;
use projectsync_core::project::{PreparedProject, Project};
use projectsync_core::store::ProjectStore;
use projectsync_core::types::DbId;

#[tokio::test]
async fn health_reports_ok_for_reachable_store() {
    let app = common::build_test_app(common::new_store());
    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
    assert_eq!(json["store"], "memory");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

/// Store that is never reachable.
struct DownStore;

#[async_trait]
impl ProjectStore for DownStore {
    async fn find_all(&self) -> Result<Vec<Project>, StoreError> {
        Err(down())
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Project>, StoreError> {
        Err(down())
    }

    async fn insert(&self, _project: &PreparedProject) -> Result<Project, StoreError> {
        Err(down())
    }

    async fn update(&self, _project: &Project) -> Result<Option<Project>, StoreError> {
        Err(down())
    }

    async fn exists_by_id(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(down())
    }

    async fn delete_by_id(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(down())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

fn down() -> StoreError {
    StoreError::Backend("connection refused".into())
}

#[tokio::test]
async fn health_reports_degraded_when_store_is_down() {
    let app = common::build_app_with(Arc::new(DownStore), common::test_config());
    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn health_names_the_configured_backend() {
    let config = projectsync_api::config::ServerConfig {
        store: StoreBackend::Postgres {
            database_url: "postgres://localhost/unused".into(),
            max_connections: 1,
        },
        ..common::test_config()
    };
    let app = common::build_app_with(common::new_store(), config);
    let json = common::body_json(common::get(app, "/health").await).await;

    assert_eq!(json["store"], "postgres");
}

#[tokio::test]
async fn unreachable_store_surfaces_as_500_with_raw_message() {
    let app = common::build_app_with(Arc::new(DownStore), common::test_config());
    let response = common::get(app, "/api/projects").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "Unexpected error");
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Store error: connection refused");
}
