use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration version was already applied.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Mark a migration version as applied.
fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Baseline schema: identities, audit scans, paired sessions.
fn migrate_baseline(conn: &Connection) -> Result<()> {
    let version = "20250918_0001_baseline_schema";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL,
            code      TEXT,
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS workers (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            tag_uid   TEXT UNIQUE,
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS readers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            code        TEXT NOT NULL UNIQUE,
            name        TEXT,
            is_active   INTEGER NOT NULL DEFAULT 1,
            location_id INTEGER REFERENCES locations(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS scans (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            reader_id   INTEGER REFERENCES readers(id) ON DELETE SET NULL,
            tag_uid     TEXT,
            occurred_at TEXT NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('in','out')),
            origin      TEXT NOT NULL DEFAULT 'nfc' CHECK(origin IN ('nfc','api','admin'))
        );

        CREATE TABLE IF NOT EXISTS work_sessions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id       INTEGER NOT NULL REFERENCES workers(id) ON DELETE RESTRICT,
            start_utc       TEXT NOT NULL,
            end_utc         TEXT,
            start_reader_id INTEGER REFERENCES readers(id) ON DELETE SET NULL,
            end_reader_id   INTEGER REFERENCES readers(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS ix_scans_worker_time
            ON scans(worker_id, occurred_at DESC);
        CREATE INDEX IF NOT EXISTS ix_sessions_worker_start
            ON work_sessions(worker_id, start_utc DESC);
        "#,
    )?;

    mark_applied(conn, version, "Created workers/readers/locations/scans/work_sessions")?;
    Ok(())
}

/// The invariant guard: at most one open session per worker, enforced by
/// the storage layer itself. Application-level check-then-insert alone
/// would race under concurrent punches.
fn migrate_unique_open_session(conn: &Connection) -> Result<()> {
    let version = "20250924_0002_unique_open_session";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_work_sessions_open
            ON work_sessions(worker_id)
            WHERE end_utc IS NULL;
        "#,
    )?;

    mark_applied(conn, version, "Unique open session per worker")?;
    success(format!(
        "Migration applied: {} → one open session per worker",
        version
    ));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    migrate_baseline(conn)?;
    migrate_unique_open_session(conn)?;
    Ok(())
}
