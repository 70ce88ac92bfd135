use serde::Serialize;

/// Flattened session row for export files: identifiers resolved to names
/// and codes so the file is readable without the database at hand.
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    pub session_id: i64,
    pub worker: String,
    pub start_utc: String,
    pub end_utc: Option<String>,
    pub duration_seconds: Option<i64>,
    pub start_reader: Option<String>,
    pub end_reader: Option<String>,
}
