use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::project::{PreparedProject, Project};
use crate::store::ProjectStore;
use crate::types::DbId;

/// In-process [`ProjectStore`] backed by an ordered map.
///
/// Ids are assigned sequentially from 1 and never reused, matching a
/// BIGSERIAL column. Iteration order is ascending id.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, Project>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn find_all(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, project: &PreparedProject) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = project.clone().into_project(inner.last_id);
        inner.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> Result<Option<Project>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&project.id) else {
            return Ok(None);
        };
        // created_at is immutable once stored.
        *row = Project {
            created_at: row.created_at,
            ..project.clone()
        };
        Ok(Some(row.clone()))
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
