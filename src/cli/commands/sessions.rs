use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::list_sessions;
use crate::errors::AppResult;
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::table::{Column, Table};
use crate::utils::time::{fmt_utc, format_seconds};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sessions {
        worker,
        open,
        limit,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let sessions = list_sessions(&pool.conn, *worker, *open, *limit)?;

        if sessions.is_empty() {
            println!("No sessions found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column { header: "ID".into(), width: 5 },
            Column { header: "Worker".into(), width: 24 },
            Column { header: "Start (UTC)".into(), width: 33 },
            Column { header: "End (UTC)".into(), width: 33 },
            Column { header: "Duration".into(), width: 12 },
        ]);

        for (s, worker_name) in &sessions {
            let (end, duration) = match s.end_utc {
                Some(end) => (
                    fmt_utc(end),
                    format_seconds((end - s.start_utc).num_seconds()),
                ),
                None => (format!("{GREEN}open{RESET}"), format!("{GREY}-{RESET}")),
            };

            table.add_row(vec![
                s.id.to_string(),
                worker_name.clone(),
                fmt_utc(s.start_utc),
                end,
                duration,
            ]);
        }

        print!("{}", table.render());
    }
    Ok(())
}
