use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::PunchLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::outcome::PunchOutcome;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::{fmt_utc, format_seconds, parse_utc};
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch {
        tag,
        reader,
        at,
        origin,
        json,
    } = cmd
    {
        // The event time is fixed here, once, and reused through the
        // duplicate check and the session mutation.
        let now = match at {
            Some(raw) => parse_utc(raw)?,
            None => Utc::now(),
        };

        let mut pool = DbPool::new(&cfg.database)?;

        let outcome = PunchLogic::apply(&mut pool, cfg, tag, reader.as_deref(), now, *origin)?;

        if *json {
            let rendered = serde_json::to_string_pretty(&outcome)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{rendered}");
            return Ok(());
        }

        match &outcome {
            PunchOutcome::Opened {
                session_id,
                started_at,
            } => {
                success(format!(
                    "Clock in: session {} opened at {}",
                    session_id,
                    fmt_utc(*started_at)
                ));
            }
            PunchOutcome::Closed {
                session_id,
                duration_seconds,
                ..
            } => {
                if *duration_seconds < 0 {
                    warning(format!(
                        "Clock anomaly: punch precedes the session start ({})",
                        format_seconds(*duration_seconds)
                    ));
                }
                success(format!(
                    "Clock out: session {} closed after {}",
                    session_id,
                    format_seconds(*duration_seconds)
                ));
            }
            PunchOutcome::Ignored { last_scan_at } => {
                info(format!(
                    "Duplicate scan ignored (last scan at {})",
                    fmt_utc(*last_scan_at)
                ));
            }
        }
    }
    Ok(())
}
