use mirador_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `prospect_events` audit table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProspectEvent {
    pub id: DbId,
    pub prospect_id: DbId,
    pub event_type: String,
    pub status: Option<String>,
    pub progress: Option<i16>,
    pub message: Option<String>,
    pub created_at: Timestamp,
}
