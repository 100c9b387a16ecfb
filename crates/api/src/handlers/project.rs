//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use projectsync_core::project::{ProjectRequest, ProjectResponse};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidJson};
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let project = state.projects.create(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = state.projects.list().await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ProjectResponse>> {
    let project = state.projects.get(id).await?;
    Ok(Json(project))
}

/// PATCH /api/projects/{id}
pub async fn update_partial(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<ProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let project = state.projects.update_partial(id, input).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    state.projects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
