//! Durable progress-event persistence.
//!
//! [`EventPersistence`] subscribes to the
//! [`ProgressChannels`](crate::ProgressChannels) firehose and writes
//! every received [`ProcessingEvent`] to the
//! `prospect_events` table. It runs as a long-lived background task and
//! shuts down when the firehose sender is dropped.

use mirador_core::progress::ProcessingEvent;
use mirador_core::types::DbId;
use mirador_db::repositories::ProspectEventRepo;
use mirador_db::DbPool;
use tokio::sync::broadcast;

/// Background service that persists progress events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop.
    ///
    /// The loop exits when the channel closes (i.e. the owning
    /// [`ProgressChannels`](crate::ProgressChannels) is dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ProcessingEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            prospect_id = event.prospect_id(),
                            "Failed to persist progress event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Progress channels closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the `prospect_events` table.
    async fn persist(pool: &DbPool, event: &ProcessingEvent) -> Result<DbId, sqlx::Error> {
        let row = match event {
            ProcessingEvent::Update {
                prospect_id,
                status,
                progress,
                message,
            } => {
                ProspectEventRepo::insert(
                    pool,
                    *prospect_id,
                    event.event_name(),
                    Some(status.as_str()),
                    Some(*progress as i16),
                    Some(message.as_str()),
                )
                .await?
            }
            ProcessingEvent::Complete {
                prospect_id,
                project_slug,
                error,
                ..
            } => {
                let message = project_slug.as_deref().or(error.as_deref());
                ProspectEventRepo::insert(
                    pool,
                    *prospect_id,
                    event.event_name(),
                    None,
                    Some(100),
                    message,
                )
                .await?
            }
            ProcessingEvent::Error {
                prospect_id,
                message,
            } => {
                ProspectEventRepo::insert(
                    pool,
                    *prospect_id,
                    event.event_name(),
                    None,
                    None,
                    Some(message.as_str()),
                )
                .await?
            }
        };
        Ok(row.id)
    }
}
