//! Handlers for prospect upload, lifecycle management, and the manual
//! materialization fallbacks.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use mirador_core::error::CoreError;
use mirador_core::status::can_reprocess;
use mirador_core::types::DbId;
use mirador_core::upload::validate_upload;
use mirador_db::models::prospect::{CreateProspect, Prospect};
use mirador_db::repositories::ProspectRepo;
use mirador_pipeline::materialize;
use mirador_pipeline::ProcessOutcome;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ── Upload ───────────────────────────────────────────────────────────

/// POST /api/v1/prospects
///
/// Accept a single marketing document (multipart), validate it, store
/// it under the configured upload directory, create the prospect row,
/// and kick off processing fire-and-forget.
pub async fn upload_prospect(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Prospect>>)> {
    let mut upload: Option<(String, Option<String>, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((file_name, content_type, data));
        break;
    }

    let Some((file_name, content_type, data)) = upload else {
        return Err(AppError::BadRequest(
            "No file received in multipart upload".to_string(),
        ));
    };

    // Validate before anything is stored; rejection leaves no state.
    let kind = validate_upload(&file_name, content_type.as_deref(), data.len() as u64)
        .map_err(AppError::Core)?;

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    // Clients may send a relative path; keep the basename only.
    let basename = file_name.rsplit('/').next().unwrap_or(&file_name);
    let stored_name = format!("{}-{basename}", uuid::Uuid::new_v4());
    let dest = state.config.upload_dir.join(stored_name);
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let prospect = ProspectRepo::create(
        &state.pool,
        &CreateProspect {
            file_name: basename.to_string(),
            file_type: kind.as_str().to_string(),
            file_url: dest.to_string_lossy().to_string(),
        },
    )
    .await?;

    tracing::info!(
        prospect_id = prospect.id,
        file_name = %prospect.file_name,
        file_type = %prospect.file_type,
        "Prospect uploaded, starting processing"
    );
    state.pipeline.spawn(prospect.id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: prospect })))
}

// ── Read / delete ────────────────────────────────────────────────────

/// GET /api/v1/prospects
pub async fn list_prospects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Prospect>>>> {
    let prospects = ProspectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prospects }))
}

/// GET /api/v1/prospects/{id}
pub async fn get_prospect(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Prospect>>> {
    let prospect = find_prospect(&state, id).await?;
    Ok(Json(DataResponse { data: prospect }))
}

/// DELETE /api/v1/prospects/{id}
///
/// Prospects are never deleted automatically; this is the explicit
/// admin action. The stored file is removed best-effort.
pub async fn delete_prospect(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let prospect = find_prospect(&state, id).await?;

    ProspectRepo::delete(&state.pool, id).await?;

    let stored = std::path::Path::new(&prospect.file_url);
    if stored.exists() {
        let _ = tokio::fs::remove_file(stored).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

// ── Reprocess ────────────────────────────────────────────────────────

/// POST /api/v1/prospects/{id}/reprocess
///
/// Re-run the pipeline for a failed or ready prospect. Responds after
/// the run finishes with its outcome; progress is streamed over the
/// SSE endpoint as usual.
pub async fn reprocess_prospect(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProcessOutcome>>> {
    let prospect = find_prospect(&state, id).await?;

    if !can_reprocess(&prospect.status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Prospect cannot be reprocessed from status '{}'",
            prospect.status
        ))));
    }

    let outcome = state.pipeline.process_prospect(id).await;
    Ok(Json(DataResponse { data: outcome }))
}

// ── Manual materialization fallbacks ─────────────────────────────────

/// POST /api/v1/prospects/{id}/create-project
///
/// Materialize a project from the prospect's stored generated fields
/// without re-running any model call.
pub async fn create_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProcessOutcome>>> {
    let prospect = find_prospect(&state, id).await?;

    let outcome = match materialize::create_project_from_prospect(&state.pool, &prospect).await {
        Ok(project) => ProcessOutcome {
            success: true,
            project_slug: Some(project.slug),
            error: None,
        },
        Err(e) => ProcessOutcome {
            success: false,
            project_slug: None,
            error: Some(e.to_string()),
        },
    };

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/prospects/{id}/create-minisite
///
/// Materialize a slug-addressed mini-site for the prospect's project
/// (creating the project first if needed) and mark the prospect
/// published.
pub async fn create_minisite(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProcessOutcome>>> {
    let prospect = find_prospect(&state, id).await?;

    let outcome = match materialize::create_minisite_for_prospect(&state.pool, &prospect).await {
        Ok(minisite) => ProcessOutcome {
            success: true,
            project_slug: Some(minisite.slug),
            error: None,
        },
        Err(e) => ProcessOutcome {
            success: false,
            project_slug: None,
            error: Some(e.to_string()),
        },
    };

    Ok(Json(DataResponse { data: outcome }))
}

// ── Private helpers ──────────────────────────────────────────────────

async fn find_prospect(state: &AppState, id: DbId) -> Result<Prospect, AppError> {
    ProspectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Prospect", id)))
}
