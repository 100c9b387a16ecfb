//! Row mapping for the `projects` table.

use projectsync_core::project::Project;
use projectsync_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub responsible: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status,
            responsible: row.responsible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
