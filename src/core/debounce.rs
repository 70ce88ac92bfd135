//! Duplicate Suppressor: absorbs rapid double-taps of a tag against a
//! reader. Not a guard against legitimate back-to-back punches by
//! different workers.

use crate::db::queries::find_most_recent_scan;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Returns the prior scan's timestamp when the punch falls inside the
/// debounce window, None otherwise. The window is measured against the
/// most recent scan for this worker, narrowed to the same reader when one
/// was resolved.
pub fn duplicate_of(
    conn: &Connection,
    worker_id: i64,
    reader_id: Option<i64>,
    now: DateTime<Utc>,
    window_seconds: i64,
) -> AppResult<Option<DateTime<Utc>>> {
    if window_seconds <= 0 {
        return Ok(None);
    }

    let prior = find_most_recent_scan(conn, worker_id, reader_id)?;
    Ok(prior
        .map(|scan| scan.occurred_at)
        .filter(|at| (now - *at).num_milliseconds() < window_seconds * 1000))
}
