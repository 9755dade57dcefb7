//! Read-side handlers for generated project listings.

use axum::extract::{Path, State};
use axum::Json;
use mirador_core::error::CoreError;
use mirador_db::models::project::Project;
use mirador_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{slug}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            key: slug,
        }))?;
    Ok(Json(DataResponse { data: project }))
}
