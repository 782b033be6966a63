use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{migrate, pool::DbPool};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

const EXPECTED_TABLES: [&str; 6] = [
    "attendance_events",
    "shift_templates",
    "assignments",
    "permissions",
    "incidents",
    "log",
];

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate: run_migrate,
        check,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *run_migrate {
            migrate::run_pending_migrations(&pool.conn)?;
            success("Migrations are up to date");
        }

        if *check {
            let mut missing = 0;
            for table in EXPECTED_TABLES {
                if migrate::table_exists(&pool.conn, table)? {
                    success(format!("table '{}' present", table));
                } else {
                    error(format!("table '{}' missing", table));
                    missing += 1;
                }
            }
            if missing > 0 {
                info("Run 'puntual db --migrate' to create missing tables");
            }
        }

        if *show_info {
            info(format!("Database file: {}", cfg.database));
            let events: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM attendance_events", [], |r| r.get(0))?;
            let templates: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM shift_templates", [], |r| r.get(0))?;
            println!("events:    {}", events);
            println!("templates: {}", templates);
        }
    }
    Ok(())
}
