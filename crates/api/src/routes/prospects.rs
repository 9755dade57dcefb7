//! Route definitions for prospect upload and lifecycle management.
//!
//! Mounted at `/prospects`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prospects;
use crate::state::AppState;

/// Multipart body limit: the 50MB document plus form overhead. The
/// handler enforces the exact per-file limit with a clean 400.
const UPLOAD_BODY_LIMIT: usize = 51 * 1024 * 1024;

/// Routes mounted at `/prospects`.
///
/// The reprocess route lives in
/// [`long_running_routes`](crate::routes::long_running_routes) instead,
/// outside the request timeout.
///
/// ```text
/// POST   /                       -> upload_prospect  (multipart)
/// GET    /                       -> list_prospects
/// GET    /{id}                   -> get_prospect
/// DELETE /{id}                   -> delete_prospect
/// POST   /{id}/create-project    -> create_project
/// POST   /{id}/create-minisite   -> create_minisite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(prospects::upload_prospect).get(prospects::list_prospects),
        )
        .route(
            "/{id}",
            get(prospects::get_prospect).delete(prospects::delete_prospect),
        )
        .route("/{id}/create-project", post(prospects::create_project))
        .route("/{id}/create-minisite", post(prospects::create_minisite))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
