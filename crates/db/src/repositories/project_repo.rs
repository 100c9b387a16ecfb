//! Repository for the `projects` table.

use projectsync_core::project::{PreparedProject, Project};
use projectsync_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::ProjectRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, responsible, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a prepared project, returning the created row.
    ///
    /// Status and timestamps are taken from `input` as-is; the database only
    /// assigns the id.
    pub async fn create(pool: &PgPool, input: &PreparedProject) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, status, responsible, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.responsible)
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id");
        sqlx::query_as::<_, ProjectRow>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column. `created_at` is never written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, project: &Project) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                description = $3,
                status = $4,
                responsible = $5,
                updated_at = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project.id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(&project.status)
            .bind(&project.responsible)
            .bind(project.updated_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
