use crate::export::model::SessionExport;
use csv::Writer;

/// Write the session rows as CSV.
pub fn write_csv(path: &str, rows: &[SessionExport]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "session_id",
        "worker",
        "start_utc",
        "end_utc",
        "duration_seconds",
        "start_reader",
        "end_reader",
    ])?;

    for row in rows {
        wtr.write_record(&[
            row.session_id.to_string(),
            row.worker.clone(),
            row.start_utc.clone(),
            row.end_utc.clone().unwrap_or_default(),
            row.duration_seconds.map(|d| d.to_string()).unwrap_or_default(),
            row.start_reader.clone().unwrap_or_default(),
            row.end_reader.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
