use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{pool::DbPool, queries};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assign {
        person,
        template,
        role,
    } = cmd
    {
        if *person <= 0 {
            return Err(AppError::Validation(format!(
                "person id must be positive, got {}",
                person
            )));
        }

        let pool = DbPool::new(&cfg.database)?;

        // Make the missing-template case a readable not-found instead of a
        // foreign-key failure.
        let exists: bool = pool
            .conn
            .query_row(
                "SELECT 1 FROM shift_templates WHERE id = ?1",
                [template],
                |_| Ok(true),
            )
            .unwrap_or(false);
        if !exists {
            return Err(AppError::NotFound(format!("shift template {}", template)));
        }

        queries::upsert_assignment(&pool.conn, *person, *template, role)?;
        queries::log_operation(
            &pool.conn,
            "assign",
            &format!("person:{}", person),
            &format!("template:{}", template),
        );
        success(format!(
            "Assigned template {} to person {}",
            template, person
        ));
    }
    Ok(())
}
