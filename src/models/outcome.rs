use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of a punch, as seen by the HTTP/CLI collaborator.
/// An ignored duplicate is a successful outcome, not an error; failures
/// travel through `AppError` instead.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PunchOutcome {
    Opened {
        session_id: i64,
        started_at: DateTime<Utc>,
    },
    Closed {
        session_id: i64,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        /// Negative when the punch timestamp precedes the session start
        /// (clock anomaly); reported as-is, never clamped.
        duration_seconds: i64,
    },
    Ignored {
        last_scan_at: DateTime<Utc>,
    },
}
