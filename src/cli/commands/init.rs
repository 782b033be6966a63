use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::{initialize, pool::DbPool};
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = if let Some(db) = &cli.db {
        Config {
            database: db.clone(),
            ..Config::default()
        }
    } else {
        Config::load()
    };

    let pool = DbPool::new(&cfg.database)?;
    initialize::init_db(&pool.conn)?;

    success("Database initialized");
    Ok(())
}
