use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{pool::DbPool, queries};
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if *print {
            let pool = DbPool::new(&cfg.database)?;
            let rows = queries::load_log(&pool.conn)?;

            if rows.is_empty() {
                info("Log is empty");
                return Ok(());
            }

            for (date, operation, target, message) in rows {
                println!("{}  [{}]  {}  {}", date, operation, target, message);
            }
        }
    }
    Ok(())
}
