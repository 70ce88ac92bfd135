use super::scan_kind::{ScanKind, ScanOrigin};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An immutable, append-only audit record of a single tag read.
/// Scans are never mutated once written; they only disappear when the
/// owning worker is deleted (cascade).
#[derive(Debug, Clone, Serialize)]
pub struct Scan {
    pub id: i64,
    pub worker_id: i64,
    /// Reader that captured the scan. Null for reader-less punches and
    /// after the reader itself was deleted.
    pub reader_id: Option<i64>,
    /// Raw tag UID as read at the moment of the scan (uppercase hex).
    pub tag_uid: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub kind: ScanKind,
    pub origin: ScanOrigin,
}
