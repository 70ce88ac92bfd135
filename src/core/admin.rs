//! Administration of workers, readers and locations. This is the only
//! place where readers get provisioned; the punch path never creates
//! identities on its own.

use crate::core::identity::{normalize_reader_code, normalize_tag};
use crate::db::log::ttlog;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::reader::Reader;
use crate::models::worker::Worker;
use rusqlite::Connection;

pub struct AdminLogic;

impl AdminLogic {
    pub fn add_worker(
        conn: &Connection,
        full_name: &str,
        raw_tag: Option<&str>,
        is_active: bool,
    ) -> AppResult<Worker> {
        let name = full_name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("worker name required".to_string()));
        }

        let tag_uid = match raw_tag {
            Some(raw) => {
                let tag = normalize_tag(raw)?;
                if queries::tag_in_use(conn, &tag, None)? {
                    return Err(AppError::TagAlreadyAssigned(tag));
                }
                Some(tag)
            }
            None => None,
        };

        let id = queries::insert_worker(conn, name, tag_uid.as_deref(), is_active)?;
        ttlog(conn, "worker_created", &id.to_string(), name)?;

        Ok(Worker {
            id,
            full_name: name.to_string(),
            tag_uid,
            is_active,
        })
    }

    /// Partial update: only the provided fields change. `tag` semantics:
    /// `Some(None)` clears the binding, `Some(Some(uid))` rebinds.
    pub fn update_worker(
        conn: &Connection,
        id: i64,
        name: Option<&str>,
        tag: Option<Option<&str>>,
        active: Option<bool>,
    ) -> AppResult<Worker> {
        let mut worker = queries::get_worker(conn, id)?.ok_or(AppError::WorkerNotFound(id))?;

        if let Some(n) = name {
            let n = n.trim();
            if n.is_empty() {
                return Err(AppError::Validation("worker name cannot be empty".to_string()));
            }
            worker.full_name = n.to_string();
        }

        match tag {
            None => {}
            Some(None) => worker.tag_uid = None,
            Some(Some(raw)) => {
                let tag = normalize_tag(raw)?;
                if queries::tag_in_use(conn, &tag, Some(id))? {
                    return Err(AppError::TagAlreadyAssigned(tag));
                }
                worker.tag_uid = Some(tag);
            }
        }

        if let Some(a) = active {
            worker.is_active = a;
        }

        queries::update_worker(conn, &worker)?;
        ttlog(conn, "worker_updated", &id.to_string(), &worker.full_name)?;
        Ok(worker)
    }

    /// Session history is immutable once created: a worker with sessions
    /// cannot be deleted, only deactivated. Scans cascade with the worker.
    pub fn delete_worker(conn: &Connection, id: i64) -> AppResult<()> {
        let worker = queries::get_worker(conn, id)?.ok_or(AppError::WorkerNotFound(id))?;
        if queries::worker_has_sessions(conn, id)? {
            return Err(AppError::WorkerHasHistory(id));
        }
        queries::delete_worker(conn, id)?;
        ttlog(conn, "worker_deleted", &id.to_string(), &worker.full_name)?;
        Ok(())
    }

    pub fn add_reader(
        conn: &Connection,
        raw_code: &str,
        name: Option<&str>,
        location: Option<&str>,
        is_active: bool,
    ) -> AppResult<Reader> {
        let code = normalize_reader_code(Some(raw_code))
            .ok_or_else(|| AppError::Validation("reader code required".to_string()))?;

        if queries::find_reader_by_code(conn, &code)?.is_some() {
            return Err(AppError::ReaderCodeExists(code));
        }

        let location_id = match location.map(str::trim).filter(|l| !l.is_empty()) {
            None => None,
            Some(loc) => Some(match queries::find_location_by_name(conn, loc)? {
                Some(found) => found.id,
                None => queries::insert_location(conn, loc, None)?,
            }),
        };

        let reader_name = name.map(str::trim).filter(|n| !n.is_empty());
        let id = queries::insert_reader(conn, &code, reader_name, is_active, location_id)?;
        ttlog(conn, "reader_created", &id.to_string(), &code)?;

        Ok(Reader {
            id,
            code,
            name: reader_name.map(str::to_string),
            is_active,
            location_id,
        })
    }

    pub fn deactivate_reader(conn: &Connection, id: i64) -> AppResult<()> {
        if queries::set_reader_active(conn, id, false)? == 0 {
            return Err(AppError::ReaderNotFound(id));
        }
        ttlog(conn, "reader_deactivated", &id.to_string(), "")?;
        Ok(())
    }

    /// Deleting a reader never cascades into work history: scans and
    /// sessions keep their rows with the reader reference nulled.
    pub fn delete_reader(conn: &Connection, id: i64) -> AppResult<()> {
        let reader = queries::get_reader(conn, id)?.ok_or(AppError::ReaderNotFound(id))?;
        queries::delete_reader(conn, id)?;
        ttlog(conn, "reader_deleted", &id.to_string(), &reader.code)?;
        Ok(())
    }

    pub fn add_location(conn: &Connection, name: &str, code: Option<&str>) -> AppResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("location name required".to_string()));
        }
        let id = queries::insert_location(conn, name, code)?;
        ttlog(conn, "location_created", &id.to_string(), name)?;
        Ok(id)
    }
}
