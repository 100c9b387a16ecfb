use async_trait::async_trait;
use projectsync_core::error::StoreError;
use projectsync_core::project::{PreparedProject, Project};
use projectsync_core::store::ProjectStore;
use projectsync_core::types::DbId;

use crate::repositories::ProjectRepo;
use crate::DbPool;

/// [`ProjectStore`] backed by PostgreSQL through [`ProjectRepo`].
#[derive(Debug, Clone)]
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn find_all(&self) -> Result<Vec<Project>, StoreError> {
        let rows = ProjectRepo::list(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        let row = ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(Project::from))
    }

    async fn insert(&self, project: &PreparedProject) -> Result<Project, StoreError> {
        let row = ProjectRepo::create(&self.pool, project)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.into())
    }

    async fn update(&self, project: &Project) -> Result<Option<Project>, StoreError> {
        let row = ProjectRepo::update(&self.pool, project)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(Project::from))
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        ProjectRepo::exists(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        ProjectRepo::hard_delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// - SQLSTATE class `23` (integrity constraint violation) maps to
///   [`StoreError::Constraint`], keeping the database's own message.
/// - Everything else maps to [`StoreError::Backend`].
pub fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().is_some_and(|code| code.starts_with("23")) {
            return StoreError::Constraint {
                constraint: db_err.constraint().map(str::to_string),
                message: db_err.message().to_string(),
            };
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}
