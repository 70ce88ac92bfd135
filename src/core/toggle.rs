//! Session Toggle Engine: the two-state machine at the heart of the
//! tracker. A worker either has no open session (a valid scan opens one)
//! or has exactly one (a valid scan closes it). Scan row and session
//! mutation commit as a single atomic unit.

use crate::db::log::ttlog;
use crate::db::queries::{close_session, find_open_session, insert_scan, insert_session};
use crate::errors::{AppError, AppResult};
use crate::models::outcome::PunchOutcome;
use crate::models::reader::Reader;
use crate::models::scan_kind::{ScanKind, ScanOrigin};
use crate::models::worker::Worker;
use crate::utils::time::fmt_utc;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};

/// Toggle the worker's session for one valid, non-duplicate scan.
///
/// The open-session read happens inside the same immediate transaction as
/// the writes, and the `ux_work_sessions_open` index backstops it: if a
/// concurrent punch slipped a second open session in, the insert fails and
/// the decision is re-evaluated against fresh state instead of surfacing a
/// raw constraint error. `retry_limit` bounds the re-reads; exhausting it
/// yields `TransientConflict`, which is safe to retry wholesale.
pub fn process_scan(
    conn: &mut Connection,
    worker: &Worker,
    reader: Option<&Reader>,
    tag_uid: &str,
    now: DateTime<Utc>,
    origin: ScanOrigin,
    retry_limit: u32,
) -> AppResult<PunchOutcome> {
    let mut attempts = 0;
    loop {
        match toggle_once(conn, worker, reader, tag_uid, now, origin) {
            Ok(outcome) => return Ok(outcome),
            Err(e) if is_toggle_conflict(&e) => {
                attempts += 1;
                if attempts > retry_limit {
                    return Err(AppError::TransientConflict);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn toggle_once(
    conn: &mut Connection,
    worker: &Worker,
    reader: Option<&Reader>,
    tag_uid: &str,
    now: DateTime<Utc>,
    origin: ScanOrigin,
) -> AppResult<PunchOutcome> {
    let reader_id = reader.map(|r| r.id);
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let outcome = match find_open_session(&tx, worker.id)? {
        None => {
            let session_id = insert_session(&tx, worker.id, now, reader_id)?;
            insert_scan(&tx, worker.id, reader_id, Some(tag_uid), now, ScanKind::In, origin)?;
            PunchOutcome::Opened {
                session_id,
                started_at: now,
            }
        }
        Some(open) => {
            if now < open.start_utc {
                // Device clocks skew in the field; close anyway, keep the
                // anomaly visible in the audit log and in the reported
                // duration instead of clamping it away.
                ttlog(
                    &tx,
                    "clock_anomaly",
                    &format!("session {}", open.id),
                    &format!(
                        "punch at {} precedes session start {}",
                        fmt_utc(now),
                        fmt_utc(open.start_utc)
                    ),
                )?;
            }
            close_session(&tx, open.id, now, reader_id)?;
            insert_scan(&tx, worker.id, reader_id, Some(tag_uid), now, ScanKind::Out, origin)?;
            PunchOutcome::Closed {
                session_id: open.id,
                started_at: open.start_utc,
                ended_at: now,
                duration_seconds: (now - open.start_utc).num_seconds(),
            }
        }
    };

    tx.commit()?;
    Ok(outcome)
}

/// Contention worth a fresh read: the one-open-session index rejected a
/// second open, or the write lock was busy past its timeout.
fn is_toggle_conflict(err: &AppError) -> bool {
    match err {
        AppError::Db(rusqlite::Error::SqliteFailure(e, msg)) => match e.code {
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => true,
            rusqlite::ErrorCode::ConstraintViolation => msg
                .as_deref()
                .is_some_and(|m| m.contains("work_sessions")),
            _ => false,
        },
        _ => false,
    }
}
