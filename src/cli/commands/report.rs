use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Engine;
use crate::db::{pool::DbPool, queries};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_seconds;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        person,
        period,
        days,
        json,
    } = cmd
    {
        let (from, to) = match period {
            Some(p) => date::resolve_period(p).map_err(AppError::InvalidDate)?,
            None => {
                let today = date::today();
                date::resolve_period(&today.format("%Y-%m").to_string())
                    .map_err(AppError::InvalidDate)?
            }
        };

        let pool = DbPool::new(&cfg.database)?;
        let events = queries::load_events_for(&pool.conn, *person, from, to)?;
        let template = queries::load_template_for_person(&pool.conn, *person)?;

        let rec = Engine::reconcile(*person, &events, template.as_ref(), from, to);

        if *json {
            println!("{}", serde_json::to_string_pretty(&rec.weekly)?);
            return Ok(());
        }

        if rec.weekly.is_empty() {
            info(format!(
                "Nothing to report for person {} between {} and {}",
                person, from, to
            ));
            return Ok(());
        }

        if *days {
            let mut day_table = Table::new(vec![
                Column::new("DATE", 10),
                Column::new("IN", 8),
                Column::new("OUT", 8),
                Column::new("MEALS", 6),
                Column::new("WORKED", 7),
            ]);
            for day in &rec.days {
                let worked = day
                    .worked_seconds()
                    .map(format_seconds)
                    .unwrap_or_else(|| "open".to_string());
                day_table.add_row(vec![
                    day.bounds.date.to_string(),
                    fmt_time(day.bounds.entrance_time),
                    fmt_time(day.bounds.exit_time),
                    format_seconds(day.meal_seconds()),
                    worked,
                ]);
            }
            print!("{}", day_table.render());
            println!();
        }

        let mut table = Table::new(vec![
            Column::new("WEEK", 9),
            Column::new("WORKED", 7),
            Column::new("SCHED", 7),
            Column::new("EXTRA", 7),
            Column::new("DAYS", 5),
            Column::new("COMPL%", 7),
        ]);
        for row in &rec.weekly {
            table.add_row(vec![
                row.iso_week.to_string(),
                format_seconds(row.worked_seconds),
                format_seconds(row.scheduled_seconds),
                format_seconds(row.overtime_seconds),
                format!("{}/{}", row.days_worked, row.days_scheduled),
                row.compliance_pct
                    .map(|p| format!("{:.1}", p))
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}

fn fmt_time(t: Option<chrono::NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
