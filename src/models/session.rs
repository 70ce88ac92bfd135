use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// A paired work interval. Open while `end_utc` is null.
#[derive(Debug, Clone, Serialize)]
pub struct WorkSession {
    pub id: i64,
    pub worker_id: i64,
    pub start_utc: DateTime<Utc>,
    /// Clock-out timestamp. None while the session is open.
    pub end_utc: Option<DateTime<Utc>>,
    pub start_reader_id: Option<i64>,
    pub end_reader_id: Option<i64>,
}

impl WorkSession {
    pub fn state(&self) -> SessionState {
        if self.end_utc.is_none() {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_utc.is_none()
    }

    /// Duration when closed. May be negative on a clock anomaly.
    pub fn duration(&self) -> Option<Duration> {
        self.end_utc.map(|end| end - self.start_utc)
    }
}
