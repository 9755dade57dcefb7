//! Repository for the prospect progress-event audit trail.

use mirador_core::types::DbId;
use sqlx::PgPool;

use crate::models::prospect_event::ProspectEvent;

/// Column list for `prospect_events`.
const EVENT_COLUMNS: &str = "id, prospect_id, event_type, status, progress, message, created_at";

/// Provides insert/list operations for prospect events.
pub struct ProspectEventRepo;

impl ProspectEventRepo {
    /// Append one event to the audit trail.
    pub async fn insert(
        pool: &PgPool,
        prospect_id: DbId,
        event_type: &str,
        status: Option<&str>,
        progress: Option<i16>,
        message: Option<&str>,
    ) -> Result<ProspectEvent, sqlx::Error> {
        let sql = format!(
            "INSERT INTO prospect_events (prospect_id, event_type, status, progress, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, ProspectEvent>(&sql)
            .bind(prospect_id)
            .bind(event_type)
            .bind(status)
            .bind(progress)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// List all events for a prospect in emission order.
    pub async fn list_by_prospect(
        pool: &PgPool,
        prospect_id: DbId,
    ) -> Result<Vec<ProspectEvent>, sqlx::Error> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM prospect_events \
             WHERE prospect_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProspectEvent>(&sql)
            .bind(prospect_id)
            .fetch_all(pool)
            .await
    }
}
