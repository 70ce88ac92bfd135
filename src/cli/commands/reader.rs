use crate::cli::parser::{Commands, ReaderAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::db::pool::DbPool;
use crate::db::queries::list_readers;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reader { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            ReaderAction::Add {
                code,
                name,
                location,
                inactive,
            } => {
                let r = AdminLogic::add_reader(
                    &pool.conn,
                    code,
                    name.as_deref(),
                    location.as_deref(),
                    !inactive,
                )?;
                success(format!("Reader {} provisioned (code {}).", r.id, r.code));
            }

            ReaderAction::List => {
                let readers = list_readers(&pool.conn)?;
                if readers.is_empty() {
                    println!("No readers provisioned.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column { header: "ID".into(), width: 5 },
                    Column { header: "Code".into(), width: 16 },
                    Column { header: "Name".into(), width: 24 },
                    Column { header: "Active".into(), width: 7 },
                    Column { header: "Location".into(), width: 20 },
                ]);

                for (r, location) in &readers {
                    table.add_row(vec![
                        r.id.to_string(),
                        r.code.clone(),
                        r.name.clone().unwrap_or_else(|| "-".to_string()),
                        if r.is_active { "yes".into() } else { "no".into() },
                        location.clone().unwrap_or_else(|| "-".to_string()),
                    ]);
                }

                print!("{}", table.render());
            }

            ReaderAction::Off { id } => {
                AdminLogic::deactivate_reader(&pool.conn, *id)?;
                success(format!("Reader {} deactivated.", id));
            }

            ReaderAction::Del { id } => {
                AdminLogic::delete_reader(&pool.conn, *id)?;
                success(format!("Reader {} deleted (scan history preserved).", id));
            }
        }
    }
    Ok(())
}
