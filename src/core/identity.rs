//! Identity Resolver: raw tag/reader identifiers → canonical records.
//! Pure lookups; raw strings never travel past this boundary.

use crate::db::queries::{find_reader_by_code, find_worker_by_tag};
use crate::errors::{AppError, AppResult};
use crate::models::reader::Reader;
use crate::models::worker::Worker;
use regex::Regex;
use rusqlite::Connection;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[0-9A-F]{4,64}$").expect("tag pattern"))
}

/// Trim + uppercase, then require plain hex. Rejected before any lookup.
pub fn normalize_tag(raw: &str) -> AppResult<String> {
    let tag = raw.trim().to_uppercase();
    if tag.is_empty() {
        return Err(AppError::Validation("tag uid required".to_string()));
    }
    if !tag_pattern().is_match(&tag) {
        return Err(AppError::Validation(format!(
            "tag uid '{tag}' is not a hex UID"
        )));
    }
    Ok(tag)
}

/// Reader codes are free-form but trimmed and uppercased; a blank code is
/// treated as "no reader" (reader-less scans are valid).
pub fn normalize_reader_code(raw: Option<&str>) -> Option<String> {
    let code = raw?.trim().to_uppercase();
    if code.is_empty() { None } else { Some(code) }
}

#[derive(Debug)]
pub struct ResolvedIdentity {
    /// Normalized tag UID actually read, kept for the scan audit row.
    pub tag_uid: String,
    pub worker: Worker,
    pub reader: Option<Reader>,
}

/// Map a raw punch to its worker and (optional) reader.
///
/// Unknown readers fail; they are never auto-provisioned here. Provisioning
/// is the explicit `reader add` admin path.
pub fn resolve(
    conn: &Connection,
    raw_tag: &str,
    raw_reader: Option<&str>,
) -> AppResult<ResolvedIdentity> {
    let tag_uid = normalize_tag(raw_tag)?;

    let worker = find_worker_by_tag(conn, &tag_uid)?
        .ok_or_else(|| AppError::UnknownTag(tag_uid.clone()))?;

    let reader = match normalize_reader_code(raw_reader) {
        None => None,
        Some(code) => Some(
            find_reader_by_code(conn, &code)?.ok_or_else(|| AppError::UnknownReader(code))?,
        ),
    };

    Ok(ResolvedIdentity {
        tag_uid,
        worker,
        reader,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{insert_reader, insert_worker};

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_db(&conn).expect("init schema");
        conn
    }

    #[test]
    fn tag_is_trimmed_and_uppercased() {
        assert_eq!(normalize_tag("  04a224ff112233 ").unwrap(), "04A224FF112233");
    }

    #[test]
    fn empty_and_non_hex_tags_are_validation_errors() {
        assert!(matches!(normalize_tag("   "), Err(AppError::Validation(_))));
        assert!(matches!(
            normalize_tag("NOT-HEX!"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn blank_reader_code_means_no_reader() {
        assert_eq!(normalize_reader_code(None), None);
        assert_eq!(normalize_reader_code(Some("  ")), None);
        assert_eq!(
            normalize_reader_code(Some(" lab-001 ")),
            Some("LAB-001".to_string())
        );
    }

    #[test]
    fn unknown_tag_is_rejected_even_with_valid_reader() {
        let conn = mem_db();
        insert_reader(&conn, "LAB-001", None, true, None).unwrap();

        let err = resolve(&conn, "DEADBEEF", Some("LAB-001")).unwrap_err();
        assert!(matches!(err, AppError::UnknownTag(t) if t == "DEADBEEF"));
    }

    #[test]
    fn inactive_worker_tag_is_unknown() {
        let conn = mem_db();
        insert_worker(&conn, "Ada Lovelace", Some("04A224FF112233"), false).unwrap();

        let err = resolve(&conn, "04A224FF112233", None).unwrap_err();
        assert!(matches!(err, AppError::UnknownTag(_)));
    }

    #[test]
    fn unknown_reader_is_rejected_not_provisioned() {
        let conn = mem_db();
        insert_worker(&conn, "Ada Lovelace", Some("04A224FF112233"), true).unwrap();

        let err = resolve(&conn, "04A224FF112233", Some("GHOST-9")).unwrap_err();
        assert!(matches!(err, AppError::UnknownReader(c) if c == "GHOST-9"));

        let readers: i64 = conn
            .query_row("SELECT COUNT(*) FROM readers", [], |r| r.get(0))
            .unwrap();
        assert_eq!(readers, 0);
    }

    #[test]
    fn resolves_worker_and_reader() {
        let conn = mem_db();
        insert_worker(&conn, "Ada Lovelace", Some("04A224FF112233"), true).unwrap();
        insert_reader(&conn, "LAB-001", Some("Lab Door"), true, None).unwrap();

        let id = resolve(&conn, "04a224ff112233", Some("lab-001")).unwrap();
        assert_eq!(id.worker.full_name, "Ada Lovelace");
        assert_eq!(id.reader.unwrap().code, "LAB-001");
        assert_eq!(id.tag_uid, "04A224FF112233");
    }
}
