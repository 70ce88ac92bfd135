use crate::errors::AppResult;
use crate::models::location::Location;
use crate::models::reader::Reader;
use crate::models::scan::Scan;
use crate::models::scan_kind::{ScanKind, ScanOrigin};
use crate::models::session::WorkSession;
use crate::models::worker::Worker;
use crate::utils::time::{fmt_utc, parse_utc};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn ts_column(idx: usize, raw: String) -> Result<DateTime<Utc>> {
    parse_utc(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn map_worker(row: &Row) -> Result<Worker> {
    Ok(Worker {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        tag_uid: row.get("tag_uid")?,
        is_active: row.get::<_, i64>("is_active")? == 1,
    })
}

pub fn map_reader(row: &Row) -> Result<Reader> {
    Ok(Reader {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        is_active: row.get::<_, i64>("is_active")? == 1,
        location_id: row.get("location_id")?,
    })
}

pub fn map_location(row: &Row) -> Result<Location> {
    Ok(Location {
        id: row.get("id")?,
        name: row.get("name")?,
        code: row.get("code")?,
        is_active: row.get::<_, i64>("is_active")? == 1,
    })
}

pub fn map_scan(row: &Row) -> Result<Scan> {
    let kind_str: String = row.get("kind")?;
    let kind = ScanKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid scan kind: {kind_str}").into(),
        )
    })?;

    let origin_str: String = row.get("origin")?;
    let origin = ScanOrigin::from_db_str(&origin_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid scan origin: {origin_str}").into(),
        )
    })?;

    Ok(Scan {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        reader_id: row.get("reader_id")?,
        tag_uid: row.get("tag_uid")?,
        occurred_at: ts_column(0, row.get("occurred_at")?)?,
        kind,
        origin,
    })
}

pub fn map_session(row: &Row) -> Result<WorkSession> {
    let end_raw: Option<String> = row.get("end_utc")?;
    let end_utc = match end_raw {
        Some(raw) => Some(ts_column(0, raw)?),
        None => None,
    };

    Ok(WorkSession {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        start_utc: ts_column(0, row.get("start_utc")?)?,
        end_utc,
        start_reader_id: row.get("start_reader_id")?,
        end_reader_id: row.get("end_reader_id")?,
    })
}

// ---------------------------------------------------------------------------
// Punch-engine storage interface
// ---------------------------------------------------------------------------

/// Look up the active worker bound to a normalized tag UID.
pub fn find_worker_by_tag(conn: &Connection, tag_uid: &str) -> AppResult<Option<Worker>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, full_name, tag_uid, is_active FROM workers
         WHERE tag_uid = ?1 AND is_active = 1",
    )?;
    Ok(stmt.query_row([tag_uid], map_worker).optional()?)
}

pub fn find_reader_by_code(conn: &Connection, code: &str) -> AppResult<Option<Reader>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, code, name, is_active, location_id FROM readers WHERE code = ?1",
    )?;
    Ok(stmt.query_row([code], map_reader).optional()?)
}

/// The worker's open session, read fresh. Never cached across requests.
pub fn find_open_session(conn: &Connection, worker_id: i64) -> AppResult<Option<WorkSession>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, worker_id, start_utc, end_utc, start_reader_id, end_reader_id
         FROM work_sessions
         WHERE worker_id = ?1 AND end_utc IS NULL
         ORDER BY start_utc DESC
         LIMIT 1",
    )?;
    Ok(stmt.query_row([worker_id], map_session).optional()?)
}

/// Most recent scan for a worker, optionally narrowed to one reader.
/// Single indexed query; history is never walked.
pub fn find_most_recent_scan(
    conn: &Connection,
    worker_id: i64,
    reader_id: Option<i64>,
) -> AppResult<Option<Scan>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, worker_id, reader_id, tag_uid, occurred_at, kind, origin
         FROM scans
         WHERE worker_id = ?1 AND (?2 IS NULL OR reader_id = ?2)
         ORDER BY occurred_at DESC
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![worker_id, reader_id], map_scan)
        .optional()?)
}

pub fn insert_scan(
    conn: &Connection,
    worker_id: i64,
    reader_id: Option<i64>,
    tag_uid: Option<&str>,
    occurred_at: DateTime<Utc>,
    kind: ScanKind,
    origin: ScanOrigin,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO scans (worker_id, reader_id, tag_uid, occurred_at, kind, origin)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            worker_id,
            reader_id,
            tag_uid,
            fmt_utc(occurred_at),
            kind.to_db_str(),
            origin.to_db_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_session(
    conn: &Connection,
    worker_id: i64,
    start_utc: DateTime<Utc>,
    start_reader_id: Option<i64>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_sessions (worker_id, start_utc, start_reader_id)
         VALUES (?1, ?2, ?3)",
        params![worker_id, fmt_utc(start_utc), start_reader_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_session(
    conn: &Connection,
    session_id: i64,
    end_utc: DateTime<Utc>,
    end_reader_id: Option<i64>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE work_sessions SET end_utc = ?1, end_reader_id = ?2
         WHERE id = ?3 AND end_utc IS NULL",
        params![fmt_utc(end_utc), end_reader_id, session_id],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

pub fn insert_worker(
    conn: &Connection,
    full_name: &str,
    tag_uid: Option<&str>,
    is_active: bool,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO workers (full_name, tag_uid, is_active) VALUES (?1, ?2, ?3)",
        params![full_name, tag_uid, is_active as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_worker(conn: &Connection, id: i64) -> AppResult<Option<Worker>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, full_name, tag_uid, is_active FROM workers WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_worker).optional()?)
}

pub fn update_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    conn.execute(
        "UPDATE workers SET full_name = ?1, tag_uid = ?2, is_active = ?3 WHERE id = ?4",
        params![w.full_name, w.tag_uid, w.is_active as i64, w.id],
    )?;
    Ok(())
}

pub fn delete_worker(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM workers WHERE id = ?1", [id])?)
}

/// True when any work session (open or closed) references this worker.
pub fn worker_has_sessions(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt =
        conn.prepare_cached("SELECT 1 FROM work_sessions WHERE worker_id = ?1 LIMIT 1")?;
    Ok(stmt.exists([id])?)
}

/// True when the tag is assigned to a worker other than `exclude_id`.
pub fn tag_in_use(conn: &Connection, tag_uid: &str, exclude_id: Option<i64>) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM workers WHERE tag_uid = ?1 AND (?2 IS NULL OR id != ?2) LIMIT 1",
    )?;
    Ok(stmt.exists(params![tag_uid, exclude_id])?)
}

/// Workers with an open-session marker, ordered by name.
pub fn list_workers(conn: &Connection) -> AppResult<Vec<(Worker, bool)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT w.id, w.full_name, w.tag_uid, w.is_active,
                EXISTS(SELECT 1 FROM work_sessions s
                       WHERE s.worker_id = w.id AND s.end_utc IS NULL) AS open_session
         FROM workers w
         ORDER BY w.full_name ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((map_worker(row)?, row.get::<_, i64>("open_session")? == 1))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Readers & locations
// ---------------------------------------------------------------------------

pub fn insert_reader(
    conn: &Connection,
    code: &str,
    name: Option<&str>,
    is_active: bool,
    location_id: Option<i64>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO readers (code, name, is_active, location_id) VALUES (?1, ?2, ?3, ?4)",
        params![code, name, is_active as i64, location_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_reader(conn: &Connection, id: i64) -> AppResult<Option<Reader>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, code, name, is_active, location_id FROM readers WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_reader).optional()?)
}

pub fn set_reader_active(conn: &Connection, id: i64, active: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE readers SET is_active = ?1 WHERE id = ?2",
        params![active as i64, id],
    )?)
}

pub fn delete_reader(conn: &Connection, id: i64) -> AppResult<usize> {
    // Historical scans and sessions keep their rows; their reader
    // references go null via ON DELETE SET NULL.
    Ok(conn.execute("DELETE FROM readers WHERE id = ?1", [id])?)
}

/// Readers with the resolved location name, ordered by code.
pub fn list_readers(conn: &Connection) -> AppResult<Vec<(Reader, Option<String>)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT r.id, r.code, r.name, r.is_active, r.location_id, l.name AS location_name
         FROM readers r
         LEFT JOIN locations l ON l.id = r.location_id
         ORDER BY r.code ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((map_reader(row)?, row.get::<_, Option<String>>("location_name")?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_location_by_name(conn: &Connection, name: &str) -> AppResult<Option<Location>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, code, is_active FROM locations WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_location).optional()?)
}

pub fn insert_location(conn: &Connection, name: &str, code: Option<&str>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO locations (name, code) VALUES (?1, ?2)",
        params![name, code],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_locations(conn: &Connection) -> AppResult<Vec<Location>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, code, is_active FROM locations ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_location)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Recent sessions with the worker's name, newest first.
pub fn list_sessions(
    conn: &Connection,
    worker_id: Option<i64>,
    open_only: bool,
    limit: i64,
) -> AppResult<Vec<(WorkSession, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT s.id, s.worker_id, s.start_utc, s.end_utc,
                s.start_reader_id, s.end_reader_id, w.full_name
         FROM work_sessions s
         JOIN workers w ON w.id = s.worker_id
         WHERE (?1 IS NULL OR s.worker_id = ?1)
           AND (?2 = 0 OR s.end_utc IS NULL)
         ORDER BY s.start_utc DESC
         LIMIT ?3",
    )?;
    let rows = stmt.query_map(params![worker_id, open_only as i64, limit], |row| {
        Ok((map_session(row)?, row.get::<_, String>("full_name")?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Recent scans with the worker's name, newest first.
pub fn list_scans(
    conn: &Connection,
    worker_id: Option<i64>,
    limit: i64,
) -> AppResult<Vec<(Scan, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT sc.id, sc.worker_id, sc.reader_id, sc.tag_uid, sc.occurred_at,
                sc.kind, sc.origin, w.full_name
         FROM scans sc
         JOIN workers w ON w.id = sc.worker_id
         WHERE (?1 IS NULL OR sc.worker_id = ?1)
         ORDER BY sc.occurred_at DESC, sc.id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![worker_id, limit], |row| {
        Ok((map_scan(row)?, row.get::<_, String>("full_name")?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    // table names come from a fixed internal list, never from user input
    let mut stmt = conn.prepare_cached(&format!("SELECT COUNT(*) FROM {table}"))?;
    Ok(stmt.query_row([], |r| r.get(0))?)
}

pub fn count_open_sessions(conn: &Connection) -> AppResult<i64> {
    let mut stmt =
        conn.prepare_cached("SELECT COUNT(*) FROM work_sessions WHERE end_utc IS NULL")?;
    Ok(stmt.query_row([], |r| r.get(0))?)
}
