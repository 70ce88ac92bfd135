use crate::cli::parser::{Commands, WorkerAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::db::pool::DbPool;
use crate::db::queries::list_workers;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Worker { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            WorkerAction::Add {
                name,
                tag,
                inactive,
            } => {
                let w = AdminLogic::add_worker(&pool.conn, name, tag.as_deref(), !inactive)?;
                match &w.tag_uid {
                    Some(tag) => success(format!("Worker {} added (tag {}).", w.id, tag)),
                    None => success(format!("Worker {} added (no tag yet).", w.id)),
                }
            }

            WorkerAction::List => {
                let workers = list_workers(&pool.conn)?;
                if workers.is_empty() {
                    println!("No workers registered.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column { header: "ID".into(), width: 5 },
                    Column { header: "Name".into(), width: 28 },
                    Column { header: "Tag".into(), width: 18 },
                    Column { header: "Active".into(), width: 7 },
                    Column { header: "Session".into(), width: 8 },
                ]);

                for (w, open) in &workers {
                    table.add_row(vec![
                        w.id.to_string(),
                        w.full_name.clone(),
                        w.tag_uid.clone().unwrap_or_else(|| "-".to_string()),
                        if w.is_active { "yes".into() } else { "no".into() },
                        if *open {
                            format!("{GREEN}open{RESET}")
                        } else {
                            format!("{GREY}-{RESET}")
                        },
                    ]);
                }

                print!("{}", table.render());
            }

            WorkerAction::Set {
                id,
                name,
                tag,
                clear_tag,
                active,
                inactive,
            } => {
                let tag_change = if *clear_tag {
                    Some(None)
                } else {
                    tag.as_deref().map(Some)
                };
                let active_change = match (*active, *inactive) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };

                let w = AdminLogic::update_worker(
                    &pool.conn,
                    *id,
                    name.as_deref(),
                    tag_change,
                    active_change,
                )?;
                success(format!("Worker {} updated ({}).", w.id, w.full_name));
            }

            WorkerAction::Del { id } => {
                AdminLogic::delete_worker(&pool.conn, *id)?;
                success(format!("Worker {} deleted.", id));
            }
        }
    }
    Ok(())
}
