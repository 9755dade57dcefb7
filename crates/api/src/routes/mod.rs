pub mod health;
pub mod projects;
pub mod prospects;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree (everything that fits inside the
/// request timeout).
///
/// Route hierarchy:
///
/// ```text
/// /prospects                          upload (multipart), list
/// /prospects/{id}                     get, delete
/// /prospects/{id}/create-project      manual materialization (POST)
/// /prospects/{id}/create-minisite     manual materialization (POST)
///
/// /projects                           list
/// /projects/{slug}                    get by slug
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/prospects", prospects::router())
        .nest("/projects", projects::router())
}

/// Routes whose responses outlive the request timeout: the SSE progress
/// stream stays open for a whole pipeline run, and reprocess responds
/// only after the re-run finishes.
pub fn long_running_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/prospects/{id}/process-stream",
            get(handlers::stream::process_stream),
        )
        .route(
            "/prospects/{id}/reprocess",
            post(handlers::prospects::reprocess_prospect),
        )
}
