//! The per-prospect SSE progress stream.
//!
//! One long-lived connection per prospect id, strict server→client
//! push. Events are JSON-encoded [`ProcessingEvent`]s; after a terminal
//! `complete`/`error` the stream ends and the connection closes.
//!
//! Reopening the stream is always safe: when no run is live the
//! endpoint synthesizes a single event from the persisted prospect row
//! and closes, so a reconnecting client converges on the same terminal
//! state the pipeline recorded.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use futures::stream::{self, BoxStream, StreamExt};
use mirador_core::error::CoreError;
use mirador_core::status::{
    STATUS_EXTRACTING, STATUS_FAILED, STATUS_FINALIZING, STATUS_MAPPING, STATUS_PUBLISHED,
    STATUS_READY, STATUS_TRANSLATING,
};
use mirador_core::types::DbId;
use mirador_db::models::prospect::Prospect;
use mirador_db::repositories::{ProjectRepo, ProspectRepo};
use mirador_events::ProcessingEvent;
use tokio_stream::wrappers::BroadcastStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/prospects/{id}/process-stream
pub async fn process_stream(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Sse<KeepAliveStream<BoxStream<'static, Result<Event, Infallible>>>>> {
    let stream: BoxStream<'static, Result<Event, Infallible>> =
        match state.channels.try_subscribe(id).await {
            Some(rx) => {
                tracing::debug!(prospect_id = id, "SSE subscriber attached to live run");
                BroadcastStream::new(rx)
                    .filter_map(|result| async move {
                        match result {
                            Ok(event) => Some(event),
                            Err(e) => {
                                // Lagged receiver: skip, the next update
                                // will resynchronize the client.
                                tracing::warn!(error = %e, "Progress stream receiver lagged");
                                None
                            }
                        }
                    })
                    // Stop right after the terminal event.
                    .scan(false, |done, event| {
                        let emit = !*done;
                        if event.is_terminal() {
                            *done = true;
                        }
                        futures::future::ready(if emit { Some(event) } else { None })
                    })
                    .map(|event| Ok(sse_event(&event)))
                    .boxed()
            }
            None => {
                let snapshot = snapshot_event(&state, id).await?;
                tracing::debug!(
                    prospect_id = id,
                    event = snapshot.event_name(),
                    "No live run, serving snapshot"
                );
                stream::iter([Ok(sse_event(&snapshot))]).boxed()
            }
        };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

/// Encode a processing event as an SSE frame.
fn sse_event(event: &ProcessingEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    Event::default().event(event.event_name()).data(data)
}

/// Derive a single event from the persisted prospect state, for
/// subscribers arriving when no pipeline run is live.
async fn snapshot_event(state: &AppState, id: DbId) -> Result<ProcessingEvent, AppError> {
    let prospect = ProspectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Prospect", id)))?;

    let event = match prospect.status.as_str() {
        STATUS_FAILED => ProcessingEvent::failed(
            id,
            prospect
                .error
                .clone()
                .unwrap_or_else(|| "Processing failed".to_string()),
        ),
        STATUS_READY | STATUS_PUBLISHED => {
            let slug = ProjectRepo::find_by_prospect(&state.pool, id)
                .await?
                .map(|p| p.slug);
            ProcessingEvent::Complete {
                prospect_id: id,
                success: true,
                project_slug: slug,
                error: None,
            }
        }
        _ => snapshot_update(&prospect),
    };

    Ok(event)
}

/// A non-terminal snapshot for a prospect whose run has not (re)started
/// yet; the client's reconnect loop will pick up the live channel.
fn snapshot_update(prospect: &Prospect) -> ProcessingEvent {
    let progress = match prospect.status.as_str() {
        STATUS_EXTRACTING => 10,
        STATUS_MAPPING => 45,
        STATUS_TRANSLATING => 70,
        STATUS_FINALIZING => 85,
        _ => 0,
    };
    ProcessingEvent::update(
        prospect.id,
        &prospect.status,
        progress,
        format!("Prospect is '{}'", prospect.status),
    )
}
