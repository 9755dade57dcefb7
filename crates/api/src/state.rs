use std::sync::Arc;

use mirador_events::ProgressChannels;
use mirador_pipeline::Pipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mirador_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-prospect progress channel registry.
    pub channels: Arc<ProgressChannels>,
    /// Processing pipeline (spawned per upload, awaited on reprocess).
    pub pipeline: Pipeline,
}
