//! The processing progress envelope.
//!
//! Serialized as JSON with a `type` tag, matching what the admin UI's
//! `EventSource` consumer and `mirador-agent` expect on the wire:
//! `update` while the pipeline advances, then exactly one terminal
//! `complete` or `error`, after which the stream closes. The type lives
//! here so consumers of the wire format do not have to pull in the
//! server-side channel infrastructure.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A progress event for one prospect's pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessingEvent {
    /// The pipeline advanced to (or within) a stage.
    Update {
        prospect_id: DbId,
        status: String,
        progress: u8,
        message: String,
    },

    /// The run finished. `project_slug` is set on success.
    Complete {
        prospect_id: DbId,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        project_slug: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// The run failed; `message` is safe to show to the admin.
    Error { prospect_id: DbId, message: String },
}

impl ProcessingEvent {
    /// Build an in-progress update.
    pub fn update(
        prospect_id: DbId,
        status: &str,
        progress: u8,
        message: impl Into<String>,
    ) -> Self {
        ProcessingEvent::Update {
            prospect_id,
            status: status.to_string(),
            progress,
            message: message.into(),
        }
    }

    /// Build a successful terminal event.
    pub fn completed(prospect_id: DbId, project_slug: impl Into<String>) -> Self {
        ProcessingEvent::Complete {
            prospect_id,
            success: true,
            project_slug: Some(project_slug.into()),
            error: None,
        }
    }

    /// Build a failed terminal event.
    pub fn failed(prospect_id: DbId, message: impl Into<String>) -> Self {
        ProcessingEvent::Error {
            prospect_id,
            message: message.into(),
        }
    }

    /// The prospect this event belongs to.
    pub fn prospect_id(&self) -> DbId {
        match self {
            ProcessingEvent::Update { prospect_id, .. }
            | ProcessingEvent::Complete { prospect_id, .. }
            | ProcessingEvent::Error { prospect_id, .. } => *prospect_id,
        }
    }

    /// Terminal events end the stream; the channel is dropped after one.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProcessingEvent::Complete { .. } | ProcessingEvent::Error { .. }
        )
    }

    /// The SSE `event:` field value for this payload.
    pub fn event_name(&self) -> &'static str {
        match self {
            ProcessingEvent::Update { .. } => "update",
            ProcessingEvent::Complete { .. } => "complete",
            ProcessingEvent::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_with_type_tag() {
        let event = ProcessingEvent::update(7, "extracting", 30, "Extracting document content");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "update");
        assert_eq!(json["prospect_id"], 7);
        assert_eq!(json["status"], "extracting");
        assert_eq!(json["progress"], 30);
        assert_eq!(json["message"], "Extracting document content");
    }

    #[test]
    fn complete_omits_absent_fields() {
        let event = ProcessingEvent::completed(7, "damac-hills-2");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["success"], true);
        assert_eq!(json["project_slug"], "damac-hills-2");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_carries_the_message() {
        let event = ProcessingEvent::failed(7, "Document extraction failed");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Document extraction failed");
    }

    #[test]
    fn terminal_classification() {
        assert!(!ProcessingEvent::update(1, "mapping", 50, "x").is_terminal());
        assert!(ProcessingEvent::completed(1, "slug").is_terminal());
        assert!(ProcessingEvent::failed(1, "boom").is_terminal());
    }

    #[test]
    fn roundtrips_through_json() {
        let event = ProcessingEvent::completed(42, "bay-residences");
        let text = serde_json::to_string(&event).unwrap();
        let back: ProcessingEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }
}
