//! Retry state machine for the progress stream consumer.
//!
//! Transport-level drops (connection refused, mid-stream disconnect)
//! are retried with bounded exponential backoff: delays of exactly
//! 1s, 2s, 4s, then give up. Any successfully parsed message resets
//! the counter. Application-level `error` events are terminal and
//! never retried.

use std::time::Duration;

/// Maximum number of reconnect attempts before giving up.
pub const MAX_RETRIES: u32 = 3;

/// Backoff delay before retry number `retries + 1`.
///
/// `delay(n) = 2^n` seconds: 1s, 2s, 4s for the three attempts.
pub fn retry_delay(retries: u32) -> Duration {
    Duration::from_secs(1u64 << retries)
}

/// Consumer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Not yet connected.
    Idle,
    /// A connection attempt is underway.
    Connecting,
    /// Connected and receiving messages.
    Active,
    /// Waiting out a backoff delay before attempt `attempt`.
    Retrying { attempt: u32 },
    /// Gave up after [`MAX_RETRIES`] transport failures.
    Failed,
    /// A terminal `complete`/`error` event arrived.
    Done,
}

/// Tracks connection state and the retry budget across reconnects.
#[derive(Debug)]
pub struct Watcher {
    state: WatchState,
    retries: u32,
}

impl Watcher {
    pub fn new() -> Self {
        Self {
            state: WatchState::Idle,
            retries: 0,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// A connection attempt is starting.
    pub fn on_connect_started(&mut self) {
        self.state = WatchState::Connecting;
    }

    /// A message parsed successfully; the retry budget refills.
    pub fn on_message(&mut self) {
        self.retries = 0;
        self.state = WatchState::Active;
    }

    /// A terminal event arrived; the watch is over.
    pub fn on_terminal(&mut self) {
        self.state = WatchState::Done;
    }

    /// The transport dropped. Returns the delay to wait before the
    /// next attempt, or `None` once the retry budget is exhausted
    /// (the watcher is then [`WatchState::Failed`]).
    pub fn on_transport_error(&mut self) -> Option<Duration> {
        if self.retries >= MAX_RETRIES {
            self.state = WatchState::Failed;
            return None;
        }
        let delay = retry_delay(self.retries);
        self.retries += 1;
        self.state = WatchState::Retrying {
            attempt: self.retries,
        };
        Some(delay)
    }
}

impl Default for Watcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_schedule_is_one_two_four_seconds() {
        assert_eq!(retry_delay(0), Duration::from_secs(1));
        assert_eq!(retry_delay(1), Duration::from_secs(2));
        assert_eq!(retry_delay(2), Duration::from_secs(4));
    }

    #[test]
    fn retries_at_most_three_times_then_fails() {
        let mut watcher = Watcher::new();
        assert_eq!(watcher.on_transport_error(), Some(Duration::from_secs(1)));
        assert_eq!(watcher.state(), WatchState::Retrying { attempt: 1 });
        assert_eq!(watcher.on_transport_error(), Some(Duration::from_secs(2)));
        assert_eq!(watcher.state(), WatchState::Retrying { attempt: 2 });
        assert_eq!(watcher.on_transport_error(), Some(Duration::from_secs(4)));
        assert_eq!(watcher.state(), WatchState::Retrying { attempt: 3 });

        assert_eq!(watcher.on_transport_error(), None);
        assert_eq!(watcher.state(), WatchState::Failed);
    }

    #[test]
    fn parsed_message_resets_the_retry_budget() {
        let mut watcher = Watcher::new();
        watcher.on_transport_error();
        watcher.on_transport_error();

        watcher.on_message();
        assert_eq!(watcher.state(), WatchState::Active);

        // The schedule restarts from 1s.
        assert_eq!(watcher.on_transport_error(), Some(Duration::from_secs(1)));
        assert_eq!(watcher.on_transport_error(), Some(Duration::from_secs(2)));
        assert_eq!(watcher.on_transport_error(), Some(Duration::from_secs(4)));
        assert_eq!(watcher.on_transport_error(), None);
    }

    #[test]
    fn lifecycle_states() {
        let mut watcher = Watcher::new();
        assert_eq!(watcher.state(), WatchState::Idle);

        watcher.on_connect_started();
        assert_eq!(watcher.state(), WatchState::Connecting);

        watcher.on_message();
        assert_eq!(watcher.state(), WatchState::Active);

        watcher.on_terminal();
        assert_eq!(watcher.state(), WatchState::Done);
    }
}
