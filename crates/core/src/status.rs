//! Prospect status vocabulary and lifecycle rules.
//!
//! These match the values stored in the `prospects.status` column and
//! streamed in progress updates. A prospect moves through the
//! processing statuses in order and can fall to `failed` from any of
//! them; `failed` and `ready` prospects can be re-queued by an admin.

pub const STATUS_UPLOADED: &str = "uploaded";
pub const STATUS_EXTRACTING: &str = "extracting";
pub const STATUS_MAPPING: &str = "mapping";
pub const STATUS_TRANSLATING: &str = "translating";
pub const STATUS_FINALIZING: &str = "finalizing";
pub const STATUS_READY: &str = "ready";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_FAILED: &str = "failed";

/// Statuses a running pipeline moves through, in order.
pub const PROCESSING_STATUSES: [&str; 4] = [
    STATUS_EXTRACTING,
    STATUS_MAPPING,
    STATUS_TRANSLATING,
    STATUS_FINALIZING,
];

/// True while a pipeline run is underway for the prospect.
pub fn is_in_progress(status: &str) -> bool {
    PROCESSING_STATUSES.contains(&status)
}

/// True once no pipeline run can be live for the prospect.
///
/// `ready` counts as settled: the run that produced it has finished,
/// even though an admin can still publish or reprocess it.
pub fn is_settled(status: &str) -> bool {
    matches!(status, STATUS_READY | STATUS_PUBLISHED | STATUS_FAILED)
}

/// True if an admin may re-run the pipeline from this status.
pub fn can_reprocess(status: &str) -> bool {
    matches!(status, STATUS_FAILED | STATUS_READY)
}

/// Whether `from -> to` is an allowed lifecycle transition.
pub fn is_valid_transition(from: &str, to: &str) -> bool {
    // Any in-progress status (and the initial one) can fall to failed.
    if to == STATUS_FAILED {
        return from == STATUS_UPLOADED || is_in_progress(from);
    }

    match (from, to) {
        (STATUS_UPLOADED, STATUS_EXTRACTING) => true,
        (STATUS_EXTRACTING, STATUS_MAPPING) => true,
        (STATUS_MAPPING, STATUS_TRANSLATING) => true,
        (STATUS_TRANSLATING, STATUS_FINALIZING) => true,
        (STATUS_FINALIZING, STATUS_READY) => true,
        (STATUS_READY, STATUS_PUBLISHED) => true,
        // Manual reprocess restarts the pipeline.
        (STATUS_FAILED | STATUS_READY, STATUS_EXTRACTING) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_valid() {
        let path = [
            STATUS_UPLOADED,
            STATUS_EXTRACTING,
            STATUS_MAPPING,
            STATUS_TRANSLATING,
            STATUS_FINALIZING,
            STATUS_READY,
            STATUS_PUBLISHED,
        ];
        for pair in path.windows(2) {
            assert!(
                is_valid_transition(pair[0], pair[1]),
                "{} -> {} should be valid",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn any_in_progress_status_can_fail() {
        for status in PROCESSING_STATUSES {
            assert!(is_valid_transition(status, STATUS_FAILED));
        }
        assert!(is_valid_transition(STATUS_UPLOADED, STATUS_FAILED));
    }

    #[test]
    fn settled_statuses_cannot_fail() {
        assert!(!is_valid_transition(STATUS_READY, STATUS_FAILED));
        assert!(!is_valid_transition(STATUS_PUBLISHED, STATUS_FAILED));
        assert!(!is_valid_transition(STATUS_FAILED, STATUS_FAILED));
    }

    #[test]
    fn published_is_final() {
        for to in [
            STATUS_UPLOADED,
            STATUS_EXTRACTING,
            STATUS_READY,
            STATUS_FAILED,
        ] {
            assert!(!is_valid_transition(STATUS_PUBLISHED, to));
        }
    }

    #[test]
    fn reprocess_restarts_from_failed_and_ready() {
        assert!(is_valid_transition(STATUS_FAILED, STATUS_EXTRACTING));
        assert!(is_valid_transition(STATUS_READY, STATUS_EXTRACTING));
        assert!(!is_valid_transition(STATUS_PUBLISHED, STATUS_EXTRACTING));
    }

    #[test]
    fn skipping_stages_is_invalid() {
        assert!(!is_valid_transition(STATUS_UPLOADED, STATUS_MAPPING));
        assert!(!is_valid_transition(STATUS_EXTRACTING, STATUS_FINALIZING));
        assert!(!is_valid_transition(STATUS_UPLOADED, STATUS_READY));
    }

    #[test]
    fn reprocess_gate() {
        assert!(can_reprocess(STATUS_FAILED));
        assert!(can_reprocess(STATUS_READY));
        assert!(!can_reprocess(STATUS_PUBLISHED));
        assert!(!can_reprocess(STATUS_MAPPING));
        assert!(!can_reprocess(STATUS_UPLOADED));
    }
}
