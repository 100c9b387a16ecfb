//! Project lifecycle service.
//!
//! Every operation performs at most one store read followed by at most one
//! store write. Store failures are propagated untouched; the only error this
//! module raises itself is [`CoreError::NotFound`].

use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreError;
use crate::project::{NewProject, ProjectRequest, ProjectResponse};
use crate::store::ProjectStore;
use crate::types::DbId;

const ENTITY: &str = "Project";

/// Stateless facade over a [`ProjectStore`]. Cheap to clone.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for health checks.
    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    /// All projects in store order.
    pub async fn list(&self) -> Result<Vec<ProjectResponse>, CoreError> {
        let projects = self.store.find_all().await?;
        tracing::debug!(count = projects.len(), "Listed projects");
        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }

    pub async fn get(&self, id: DbId) -> Result<ProjectResponse, CoreError> {
        let project = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::debug!(project_id = id, "Fetched project");
        Ok(project.into())
    }

    /// Insert a new project. Missing `status` becomes `"NEW"` and both
    /// timestamps are set to the same instant.
    pub async fn create(&self, request: ProjectRequest) -> Result<ProjectResponse, CoreError> {
        let prepared = NewProject::from(request).prepare(Utc::now());
        let saved = self.store.insert(&prepared).await?;
        tracing::info!(project_id = saved.id, status = %saved.status, "Project created");
        Ok(saved.into())
    }

    /// Overwrite the fields present in `request` and refresh `updated_at`.
    ///
    /// The row is written even when `request` carries no fields, so an empty
    /// patch still bumps `updated_at`.
    pub async fn update_partial(
        &self,
        id: DbId,
        request: ProjectRequest,
    ) -> Result<ProjectResponse, CoreError> {
        let mut project = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        project.apply(request);
        project.touch(Utc::now());

        // The row can disappear between the read and the write.
        let updated = self
            .store
            .update(&project)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(project_id = id, "Project updated");
        Ok(updated.into())
    }

    /// Permanently remove a project. Existence is checked before deleting.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if !self.store.exists_by_id(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }
        if self.store.delete_by_id(id).await? {
            tracing::info!(project_id = id, "Project deleted");
        } else {
            tracing::debug!(project_id = id, "Project already gone at delete time");
        }
        Ok(())
    }
}
