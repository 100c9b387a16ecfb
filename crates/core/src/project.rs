//! Project entity, its transient form and the request/response shapes.
//!
//! Defaulting and timestamping are plain function calls here
//! ([`NewProject::prepare`], [`Project::apply`], [`Project::touch`]) so the
//! service can run them as explicit steps instead of relying on the store.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// Status assigned at creation when the request leaves it unset.
pub const DEFAULT_STATUS: &str = "NEW";

/// Maximum length of every free-text column (`VARCHAR(255)`).
pub const MAX_TEXT_LEN: u64 = 255;

/// A persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub responsible: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Overwrite every field that is present in `patch`; absent fields are left as they are.
    pub fn apply(&mut self, patch: ProjectRequest) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(responsible) = patch.responsible {
            self.responsible = Some(responsible);
        }
    }

    /// Refresh `updated_at`. Never moves it backwards, so `created_at <= updated_at` holds
    /// even if the wall clock steps back.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at);
    }
}

/// A project that has not been stored yet: no id, no timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub responsible: Option<String>,
}

impl NewProject {
    /// Apply creation defaults: status falls back to [`DEFAULT_STATUS`] and both
    /// timestamps are set to `now`.
    pub fn prepare(self, now: Timestamp) -> PreparedProject {
        PreparedProject {
            name: self.name,
            description: self.description,
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            responsible: self.responsible,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ProjectRequest> for NewProject {
    fn from(request: ProjectRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            status: request.status,
            responsible: request.responsible,
        }
    }
}

/// A transient project with defaults applied, ready for insertion.
/// The store only assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub responsible: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PreparedProject {
    /// Attach a store-assigned id.
    pub fn into_project(self, id: DbId) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            responsible: self.responsible,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Body of both the create and the partial-update request.
///
/// A missing key and an explicit `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(max = MAX_TEXT_LEN, message = "must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = MAX_TEXT_LEN, message = "must be at most 255 characters"))]
    pub description: Option<String>,
    #[validate(length(max = MAX_TEXT_LEN, message = "must be at most 255 characters"))]
    pub status: Option<String>,
    #[validate(length(max = MAX_TEXT_LEN, message = "must be at most 255 characters"))]
    pub responsible: Option<String>,
}

/// Read-only projection returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub responsible: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            status: project.status,
            responsible: project.responsible,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}
