use crate::cli::parser::{Commands, LocationAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::db::pool::DbPool;
use crate::db::queries::list_locations;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Location { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            LocationAction::Add { name, code } => {
                let id = AdminLogic::add_location(&pool.conn, name, code.as_deref())?;
                success(format!("Location {} added ({}).", id, name));
            }

            LocationAction::List => {
                let locations = list_locations(&pool.conn)?;
                if locations.is_empty() {
                    println!("No locations defined.");
                    return Ok(());
                }
                for l in &locations {
                    println!(
                        "{:>4}  {}  {}",
                        l.id,
                        l.name,
                        l.code.clone().unwrap_or_default()
                    );
                }
            }
        }
    }
    Ok(())
}
