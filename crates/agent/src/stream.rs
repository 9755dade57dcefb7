//! SSE subscription loop for one prospect's progress stream.
//!
//! Connects to `GET /api/v1/prospects/{id}/process-stream`, parses the
//! event stream, and drives the [`Watcher`] state machine: transport
//! drops reconnect with backoff, terminal events end the watch.

use futures::StreamExt;
use mirador_core::progress::ProcessingEvent;
use mirador_core::types::DbId;
use tokio_util::sync::CancellationToken;

use crate::watch::{Watcher, MAX_RETRIES};

// ── SSE wire parsing ─────────────────────────────────────────────────

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    /// The `event:` field, if the server set one.
    pub event: Option<String>,
    /// Concatenated `data:` lines.
    pub data: String,
}

/// Incremental parser for an SSE byte stream.
///
/// Feed arbitrary chunks with [`push`](Self::push); complete events are
/// returned as they are terminated by a blank line. Comment lines
/// (keep-alives) and unknown fields are ignored.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk, returning any events it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut messages = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if !self.data.is_empty() {
                    messages.push(SseMessage {
                        event: self.event.take(),
                        data: self.data.join("\n"),
                    });
                    self.data.clear();
                } else {
                    self.event = None;
                }
            } else if line.starts_with(':') {
                // Comment (keep-alive) lines are ignored.
            } else if let Some(value) = line.strip_prefix("event:") {
                self.event = Some(value.trim_start().to_string());
            } else if let Some(value) = line.strip_prefix("data:") {
                self.data.push(value.trim_start().to_string());
            }
            // Other fields (id, retry) are not used by this stream.
        }
        messages
    }
}

// ── Watch loop ───────────────────────────────────────────────────────

/// How a watch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    /// Terminal `complete` with `success=true`.
    Completed { project_slug: Option<String> },
    /// Terminal `error`, or `complete` with `success=false`.
    Failed { message: String },
    /// The retry budget ran out on transport errors.
    GaveUp,
    /// Cancelled locally (Ctrl-C); server-side processing continues.
    Aborted,
}

enum SessionEnd {
    Terminal(WatchOutcome),
    Transport(String),
    Cancelled,
}

/// Watch one prospect's progress stream until a terminal event, the
/// retry budget runs out, or the token is cancelled.
pub async fn watch_prospect(
    http: &reqwest::Client,
    base_url: &str,
    prospect_id: DbId,
    cancel: &CancellationToken,
) -> WatchOutcome {
    let url = format!("{base_url}/api/v1/prospects/{prospect_id}/process-stream");
    let mut watcher = Watcher::new();

    loop {
        watcher.on_connect_started();
        tracing::info!(url = %url, "Connecting to progress stream");

        match run_session(http, &url, &mut watcher, cancel).await {
            SessionEnd::Terminal(outcome) => return outcome,
            SessionEnd::Cancelled => return WatchOutcome::Aborted,
            SessionEnd::Transport(reason) => {
                tracing::warn!(reason = %reason, "Progress stream interrupted");
                match watcher.on_transport_error() {
                    Some(delay) => {
                        tracing::info!(
                            delay_secs = delay.as_secs(),
                            "Retrying progress stream"
                        );
                        tokio::select! {
                            _ = cancel.cancelled() => return WatchOutcome::Aborted,
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                    None => {
                        tracing::error!(
                            attempts = MAX_RETRIES,
                            "Giving up on progress stream"
                        );
                        return WatchOutcome::GaveUp;
                    }
                }
            }
        }
    }
}

/// Drive a single connected session until it yields a terminal event,
/// drops, or is cancelled.
async fn run_session(
    http: &reqwest::Client,
    url: &str,
    watcher: &mut Watcher,
    cancel: &CancellationToken,
) -> SessionEnd {
    let response = tokio::select! {
        _ = cancel.cancelled() => return SessionEnd::Cancelled,
        result = http
            .get(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send() => match result {
                Ok(response) => response,
                Err(e) => return SessionEnd::Transport(e.to_string()),
            },
    };

    if !response.status().is_success() {
        return SessionEnd::Transport(format!("server returned {}", response.status()));
    }

    let mut body = response.bytes_stream();
    let mut parser = SseParser::new();

    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return SessionEnd::Cancelled,
            chunk = body.next() => chunk,
        };

        let bytes = match chunk {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => return SessionEnd::Transport(e.to_string()),
            // Stream ended without a terminal event: a transport-level
            // close, not an application outcome.
            None => return SessionEnd::Transport("stream closed".to_string()),
        };

        for message in parser.push(&bytes) {
            let event: ProcessingEvent = match serde_json::from_str(&message.data) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unparseable event");
                    continue;
                }
            };

            watcher.on_message();

            match event {
                ProcessingEvent::Update {
                    status,
                    progress,
                    message,
                    ..
                } => {
                    tracing::info!(status = %status, progress, message = %message, "Progress");
                }
                ProcessingEvent::Complete {
                    success: true,
                    project_slug,
                    ..
                } => {
                    watcher.on_terminal();
                    return SessionEnd::Terminal(WatchOutcome::Completed { project_slug });
                }
                ProcessingEvent::Complete { error, .. } => {
                    watcher.on_terminal();
                    return SessionEnd::Terminal(WatchOutcome::Failed {
                        message: error.unwrap_or_else(|| "Processing failed".to_string()),
                    });
                }
                ProcessingEvent::Error { message, .. } => {
                    watcher.on_terminal();
                    return SessionEnd::Terminal(WatchOutcome::Failed { message });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_event() {
        let mut parser = SseParser::new();
        let messages =
            parser.push(b"event: update\ndata: {\"progress\": 10}\n\n");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event.as_deref(), Some("update"));
        assert_eq!(messages[0].data, "{\"progress\": 10}");
    }

    #[test]
    fn handles_events_split_across_chunks() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"event: comp").is_empty());
        assert!(parser.push(b"lete\ndata: {\"success\"").is_empty());
        let messages = parser.push(b": true}\n\n");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event.as_deref(), Some("complete"));
        assert_eq!(messages[0].data, "{\"success\": true}");
    }

    #[test]
    fn ignores_keep_alive_comments() {
        let mut parser = SseParser::new();
        assert!(parser.push(b": keep-alive\n\n").is_empty());
        let messages = parser.push(b"data: {}\n\n");
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn joins_multiple_data_lines() {
        let mut parser = SseParser::new();
        let messages = parser.push(b"data: line-one\ndata: line-two\n\n");
        assert_eq!(messages[0].data, "line-one\nline-two");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let mut parser = SseParser::new();
        let messages = parser.push(b"event: update\r\ndata: {}\r\n\r\n");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event.as_deref(), Some("update"));
    }

    #[test]
    fn parses_wire_events_into_the_envelope() {
        let mut parser = SseParser::new();
        let messages = parser.push(
            b"event: complete\ndata: {\"type\":\"complete\",\"prospect_id\":4,\
              \"success\":true,\"project_slug\":\"damac-hills-2\"}\n\n",
        );
        let event: ProcessingEvent = serde_json::from_str(&messages[0].data).unwrap();
        assert_eq!(
            event,
            ProcessingEvent::completed(4, "damac-hills-2")
        );
    }
}
