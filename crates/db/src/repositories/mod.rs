//! Repository layer: one zero-sized struct per table with async CRUD methods.

pub mod project_repo;

pub use project_repo::ProjectRepo;
