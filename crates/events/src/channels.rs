//! Per-prospect progress fan-out.
//!
//! Each running pipeline owns one broadcast channel keyed by prospect
//! id; any number of SSE subscribers can attach, and a global firehose
//! carries every event for cross-cutting consumers (persistence).
//! Publishing a terminal event drops the per-prospect channel, which
//! ends the subscribers' streams.

use std::collections::HashMap;

use mirador_core::progress::ProcessingEvent;
use mirador_core::types::DbId;
use tokio::sync::{broadcast, RwLock};

/// Buffer capacity per prospect channel and for the firehose.
const CHANNEL_CAPACITY: usize = 256;

/// Registry of live progress channels.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`
/// and shared between the API handlers and the pipeline.
pub struct ProgressChannels {
    jobs: RwLock<HashMap<DbId, broadcast::Sender<ProcessingEvent>>>,
    firehose: broadcast::Sender<ProcessingEvent>,
}

impl ProgressChannels {
    /// Create an empty registry.
    pub fn new() -> Self {
        let (firehose, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            jobs: RwLock::new(HashMap::new()),
            firehose,
        }
    }

    /// Ensure a channel exists for a prospect. Called by the pipeline
    /// when a run starts so late subscribers see it as active.
    pub async fn open(&self, prospect_id: DbId) {
        let mut jobs = self.jobs.write().await;
        jobs.entry(prospect_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
    }

    /// Subscribe to one prospect's progress, creating the channel if a
    /// run has not started yet.
    pub async fn subscribe(&self, prospect_id: DbId) -> broadcast::Receiver<ProcessingEvent> {
        let mut jobs = self.jobs.write().await;
        jobs.entry(prospect_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Subscribe only if a channel is live for the prospect.
    ///
    /// Unlike [`subscribe`](Self::subscribe) this never creates a
    /// channel, so a finished (or not-yet-started) run is observable as
    /// `None` rather than as a stream that never produces.
    pub async fn try_subscribe(
        &self,
        prospect_id: DbId,
    ) -> Option<broadcast::Receiver<ProcessingEvent>> {
        self.jobs
            .read()
            .await
            .get(&prospect_id)
            .map(|sender| sender.subscribe())
    }

    /// Subscribe to every event published on the registry.
    pub fn subscribe_all(&self) -> broadcast::Receiver<ProcessingEvent> {
        self.firehose.subscribe()
    }

    /// Whether a channel is live for the prospect.
    pub async fn is_active(&self, prospect_id: DbId) -> bool {
        self.jobs.read().await.contains_key(&prospect_id)
    }

    /// Publish an event to the prospect's channel (if any) and the
    /// firehose. A terminal event drops the per-prospect channel.
    ///
    /// Send errors are ignored; they only mean there are currently no
    /// receivers on that side.
    pub async fn publish(&self, event: ProcessingEvent) {
        let prospect_id = event.prospect_id();
        let terminal = event.is_terminal();

        let _ = self.firehose.send(event.clone());

        {
            let jobs = self.jobs.read().await;
            if let Some(sender) = jobs.get(&prospect_id) {
                let _ = sender.send(event);
            }
        }

        if terminal {
            self.jobs.write().await.remove(&prospect_id);
        }
    }

    /// Number of live per-prospect channels.
    pub async fn active_count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

impl Default for ProgressChannels {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_events_in_order() {
        let channels = ProgressChannels::new();
        let mut rx = channels.subscribe(1).await;

        channels
            .publish(ProcessingEvent::update(1, "extracting", 10, "start"))
            .await;
        channels
            .publish(ProcessingEvent::update(1, "mapping", 50, "halfway"))
            .await;

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.event_name(), "update");
        assert!(matches!(
            second,
            ProcessingEvent::Update { ref status, .. } if status == "mapping"
        ));
    }

    #[tokio::test]
    async fn publish_without_subscribers_does_not_panic() {
        let channels = ProgressChannels::new();
        channels.open(9).await;
        channels
            .publish(ProcessingEvent::update(9, "extracting", 10, "orphan"))
            .await;
    }

    #[tokio::test]
    async fn terminal_event_drops_the_channel() {
        let channels = ProgressChannels::new();
        let mut rx = channels.subscribe(3).await;
        assert!(channels.is_active(3).await);

        channels
            .publish(ProcessingEvent::completed(3, "palm-views"))
            .await;

        assert!(!channels.is_active(3).await);
        // The subscriber still gets the terminal event, then the
        // channel closes.
        let event = rx.recv().await.unwrap();
        assert!(event.is_terminal());
        assert!(rx.recv().await.is_err());
    }

    #[tokio::test]
    async fn firehose_sees_events_for_all_prospects() {
        let channels = ProgressChannels::new();
        let mut all = channels.subscribe_all();
        channels.open(1).await;
        channels.open(2).await;

        channels
            .publish(ProcessingEvent::update(1, "extracting", 10, "a"))
            .await;
        channels
            .publish(ProcessingEvent::update(2, "mapping", 50, "b"))
            .await;

        assert_eq!(all.recv().await.unwrap().prospect_id(), 1);
        assert_eq!(all.recv().await.unwrap().prospect_id(), 2);
    }

    #[tokio::test]
    async fn channels_are_independent_per_prospect() {
        let channels = ProgressChannels::new();
        let mut rx1 = channels.subscribe(1).await;
        let _rx2 = channels.subscribe(2).await;

        channels
            .publish(ProcessingEvent::update(2, "extracting", 10, "other"))
            .await;
        channels
            .publish(ProcessingEvent::update(1, "extracting", 10, "mine"))
            .await;

        let event = rx1.recv().await.unwrap();
        assert_eq!(event.prospect_id(), 1);
    }
}
