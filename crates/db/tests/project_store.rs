//! Integration tests for the PostgreSQL project store.
//!
//! Exercises the repository and the core service against a real database.
//! Requires `DATABASE_URL`; run with `cargo test -p projectsync-db -- --ignored`.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use projectsync_core::error::{CoreError, StoreError};
use projectsync_core::project::{NewProject, ProjectRequest, DEFAULT_STATUS};
use projectsync_core::service::ProjectService;
use projectsync_core::store::ProjectStore;
use projectsync_db::repositories::ProjectRepo;
use projectsync_db::PgProjectStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn service(pool: PgPool) -> ProjectService {
    ProjectService::new(Arc::new(PgProjectStore::new(pool)))
}

fn named(name: &str) -> ProjectRequest {
    ProjectRequest {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_bootstrap_and_health(pool: PgPool) {
    projectsync_db::health_check(&pool).await.unwrap();
    let store = PgProjectStore::new(pool);
    store.health_check().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_assigns_id_and_keeps_fields(pool: PgPool) {
    let prepared = NewProject {
        name: Some("Repo".into()),
        responsible: Some("Ana".into()),
        ..Default::default()
    }
    .prepare(Utc::now());

    let row = ProjectRepo::create(&pool, &prepared).await.unwrap();
    assert!(row.id > 0);
    assert_eq!(row.status, DEFAULT_STATUS);
    assert_eq!(row.responsible.as_deref(), Some("Ana"));
    assert_eq!(row.description, None);
    assert_eq!(row.created_at, row.updated_at);

    assert!(ProjectRepo::exists(&pool, row.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_row_returns_none(pool: PgPool) {
    let ghost = NewProject::default().prepare(Utc::now()).into_project(999_999);
    assert!(ProjectRepo::update(&pool, &ghost).await.unwrap().is_none());
    assert!(!ProjectRepo::hard_delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_timestamp_check_is_a_constraint_violation(pool: PgPool) {
    let store = PgProjectStore::new(pool);
    let mut prepared = NewProject::default().prepare(Utc::now());
    prepared.updated_at = prepared.created_at - Duration::hours(1);

    let err = store.insert(&prepared).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::Constraint { constraint: Some(c), .. } if c == "ck_projects_timestamps"
    );
}

// ---------------------------------------------------------------------------
// Service over PostgreSQL
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_service_lifecycle(pool: PgPool) {
    let svc = service(pool);

    let created = svc
        .create(ProjectRequest {
            name: Some("Capuccino Backend".into()),
            description: Some("Core services".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.status, "NEW");
    assert_eq!(created.created_at, created.updated_at);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = svc
        .update_partial(
            created.id,
            ProjectRequest {
                status: Some("Active".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Capuccino Backend"));
    assert_eq!(updated.status, "Active");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    svc.delete(created.id).await.unwrap();
    assert_matches!(
        svc.get(created.id).await,
        Err(CoreError::NotFound { .. })
    );
    assert_matches!(
        svc.delete(created.id).await,
        Err(CoreError::NotFound { .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_service_list_in_id_order(pool: PgPool) {
    let svc = service(pool);
    for name in ["P1", "P2", "P3"] {
        svc.create(named(name)).await.unwrap();
    }

    let names: Vec<_> = svc
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|p| p.name)
        .collect();
    assert_eq!(names, ["P1", "P2", "P3"]);
}
