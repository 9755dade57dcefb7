//! Route definitions for generated project listings.
//!
//! Mounted at `/projects`.

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET /           -> list_projects
/// GET /{slug}     -> get_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects))
        .route("/{slug}", get(projects::get_project))
}
