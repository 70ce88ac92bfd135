use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::model::SessionExport;
use crate::export::{ExportFormat, csv, json, notify_export_success};
use crate::utils::time::parse_utc;
use rusqlite::params;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    pub fn run(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        worker_id: Option<i64>,
        force: bool,
    ) -> AppResult<()> {
        let dest = Path::new(file);
        if dest.exists() && !force {
            return Err(AppError::Export(format!(
                "file '{}' already exists (use --force to overwrite)",
                dest.display()
            )));
        }

        let rows = load_rows(pool, worker_id)?;

        match format {
            ExportFormat::Csv => csv::write_csv(file, &rows)?,
            ExportFormat::Json => json::write_json(file, &rows)?,
        }

        notify_export_success(format.as_str(), dest);
        Ok(())
    }
}

/// Sessions joined with worker names and reader codes, oldest first.
fn load_rows(pool: &mut DbPool, worker_id: Option<i64>) -> AppResult<Vec<SessionExport>> {
    let mut stmt = pool.conn.prepare_cached(
        "SELECT s.id, w.full_name, s.start_utc, s.end_utc, r1.code AS start_reader, r2.code AS end_reader
         FROM work_sessions s
         JOIN workers w ON w.id = s.worker_id
         LEFT JOIN readers r1 ON r1.id = s.start_reader_id
         LEFT JOIN readers r2 ON r2.id = s.end_reader_id
         WHERE (?1 IS NULL OR s.worker_id = ?1)
         ORDER BY s.start_utc ASC, s.id ASC",
    )?;

    let rows = stmt.query_map(params![worker_id], |row| {
        Ok(SessionExport {
            session_id: row.get("id")?,
            worker: row.get("full_name")?,
            start_utc: row.get("start_utc")?,
            end_utc: row.get("end_utc")?,
            duration_seconds: None,
            start_reader: row.get("start_reader")?,
            end_reader: row.get("end_reader")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        let mut row: SessionExport = r?;
        // duration only exists once the session is closed
        if let Some(end_raw) = &row.end_utc {
            let start = parse_utc(&row.start_utc)?;
            let end = parse_utc(end_raw)?;
            row.duration_seconds = Some((end - start).num_seconds());
        }
        out.push(row);
    }
    Ok(out)
}
