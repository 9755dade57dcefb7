use mirador_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `minisites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Minisite {
    pub id: DbId,
    pub project_id: DbId,
    pub slug: String,
    pub published: bool,
    pub created_at: Timestamp,
}
