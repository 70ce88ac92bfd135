use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::list_scans;
use crate::errors::AppResult;
use crate::utils::colors::colorize_kind;
use crate::utils::table::{Column, Table};
use crate::utils::time::fmt_utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scans { worker, limit } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let scans = list_scans(&pool.conn, *worker, *limit)?;

        if scans.is_empty() {
            println!("No scans recorded.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column { header: "ID".into(), width: 6 },
            Column { header: "Worker".into(), width: 24 },
            Column { header: "Kind".into(), width: 13 },
            Column { header: "At (UTC)".into(), width: 33 },
            Column { header: "Origin".into(), width: 7 },
        ]);

        for (scan, worker_name) in &scans {
            table.add_row(vec![
                scan.id.to_string(),
                worker_name.clone(),
                colorize_kind(scan.kind.to_db_str(), scan.kind.is_in()),
                fmt_utc(scan.occurred_at),
                scan.origin.to_db_str().to_string(),
            ]);
        }

        print!("{}", table.render());
    }
    Ok(())
}
