use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{pool::DbPool, queries};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::DayWindow;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_seconds, parse_window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Template {
        new,
        list,
        del,
        inactive,
        mon,
        tue,
        wed,
        thu,
        fri,
        sat,
        sun,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(name) = new {
            let name = name.trim();
            if name.is_empty() || name.chars().count() > 60 {
                return Err(AppError::Validation(
                    "template name is required and must be at most 60 characters".into(),
                ));
            }

            let args = [mon, tue, wed, thu, fri, sat, sun];
            let mut days: [Option<DayWindow>; 7] = [None; 7];
            for (i, arg) in args.iter().enumerate() {
                if let Some(spec) = arg {
                    days[i] = Some(parse_window(spec)?);
                }
            }

            let id = queries::insert_template(&pool.conn, name, !*inactive, &days)?;
            queries::log_operation(
                &pool.conn,
                "template-new",
                &format!("template:{}", id),
                name,
            );
            success(format!("Created template '{}' with id {}", name, id));
        }

        if *list {
            let templates = queries::list_templates(&pool.conn)?;
            if templates.is_empty() {
                info("No templates defined");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("NAME", 20),
                Column::new("ACTIVE", 7),
                Column::new("DAYS", 5),
                Column::new("WEEKLY", 7),
            ]);
            for t in templates {
                let weekly: i64 = t
                    .days
                    .iter()
                    .flatten()
                    .filter_map(DayWindow::scheduled_seconds)
                    .sum();
                table.add_row(vec![
                    t.id.to_string(),
                    t.name.clone(),
                    if t.active { "yes" } else { "no" }.to_string(),
                    t.days_scheduled().to_string(),
                    format_seconds(weekly),
                ]);
            }
            print!("{}", table.render());
        }

        if let Some(id) = del {
            queries::delete_template(&pool.conn, *id)?;
            queries::log_operation(&pool.conn, "template-del", &format!("template:{}", id), "");
            success(format!("Deleted template {}", id));
        }
    }
    Ok(())
}
