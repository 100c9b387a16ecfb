//! Persistence seam for projects.
//!
//! The service talks to storage only through [`ProjectStore`]. The PostgreSQL
//! adapter lives in `projectsync-db`; [`MemoryProjectStore`] keeps rows in
//! process for tests and database-less runs.

mod memory;

pub use memory::MemoryProjectStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::project::{PreparedProject, Project};
use crate::types::DbId;

/// Key-based record store for projects.
///
/// Calls are awaited to completion; timeouts and retries, if any, belong to
/// the implementation.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects in store iteration order.
    async fn find_all(&self) -> Result<Vec<Project>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError>;

    /// Insert a prepared project and return it with its assigned id.
    async fn insert(&self, project: &PreparedProject) -> Result<Project, StoreError>;

    /// Overwrite every mutable column of `project`.
    ///
    /// Returns `None` if no row with `project.id` exists.
    async fn update(&self, project: &Project) -> Result<Option<Project>, StoreError>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    /// Permanently delete a project. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    /// Cheap reachability check used by `/health`.
    async fn health_check(&self) -> Result<(), StoreError>;
}
