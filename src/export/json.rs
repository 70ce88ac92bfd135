use crate::errors::{AppError, AppResult};
use crate::export::model::SessionExport;

/// Write the session rows as pretty-printed JSON.
pub fn write_json(path: &str, rows: &[SessionExport]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
