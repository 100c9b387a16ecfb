//! Domain layer for the ProjectSync service.
//!
//! Holds the project entity and its request/response shapes, the error
//! taxonomy, the [`store::ProjectStore`] seam and the [`service::ProjectService`]
//! that enforces defaulting and timestamp policy. Nothing here knows about
//! HTTP or SQL.

pub mod error;
pub mod project;
pub mod service;
pub mod store;
pub mod types;
