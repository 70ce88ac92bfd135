//! Punch orchestration: resolve → debounce → toggle.
//!
//! The caller captures `now` once at request entry; the same instant flows
//! through the duplicate check and the session mutation so the two can
//! never disagree about the event time.

use crate::config::Config;
use crate::core::{debounce, identity, toggle};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::outcome::PunchOutcome;
use crate::models::scan_kind::ScanOrigin;
use chrono::{DateTime, Utc};

pub struct PunchLogic;

impl PunchLogic {
    /// Process one raw tag scan end to end.
    ///
    /// Resolver and suppressor failures short-circuit before any write; a
    /// dropped duplicate writes nothing at all. Only the toggle engine's
    /// storage conflict is retried internally.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        raw_tag: &str,
        raw_reader: Option<&str>,
        now: DateTime<Utc>,
        origin: ScanOrigin,
    ) -> AppResult<PunchOutcome> {
        let resolved = identity::resolve(&pool.conn, raw_tag, raw_reader)?;
        let reader_id = resolved.reader.as_ref().map(|r| r.id);

        if let Some(last_scan_at) = debounce::duplicate_of(
            &pool.conn,
            resolved.worker.id,
            reader_id,
            now,
            cfg.duplicate_window_seconds,
        )? {
            return Ok(PunchOutcome::Ignored { last_scan_at });
        }

        toggle::process_scan(
            &mut pool.conn,
            &resolved.worker,
            resolved.reader.as_ref(),
            &resolved.tag_uid,
            now,
            origin,
            cfg.toggle_retry_limit,
        )
    }
}
