use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{pool::DbPool, queries};
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::ui::messages::{success, warning};
use crate::utils::{date, time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        person,
        motive,
        code,
        date: date_arg,
        time: time_arg,
        manual,
        note,
    } = cmd
    {
        if *person <= 0 {
            return Err(AppError::Validation(format!(
                "person id must be positive, got {}",
                person
            )));
        }
        if note.chars().count() > cfg.note_max_len {
            return Err(AppError::Validation(format!(
                "note exceeds {} characters",
                cfg.note_max_len
            )));
        }

        let ev_date = match date_arg {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => date::today(),
        };
        let ev_time = match time_arg {
            Some(t) => time::parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone()))?,
            None => chrono::Local::now().time(),
        };

        let ev = AttendanceEvent::new(*person, ev_date, ev_time, motive, *code, *manual, note);

        if !ev.kind.counts_for_duration() {
            // Still recorded for the history, just excluded from durations.
            warning(format!(
                "motive '{}' is not a recognized clock kind; recording as generic movement",
                motive
            ));
        }

        let pool = DbPool::new(&cfg.database)?;
        let id = queries::insert_event(&pool.conn, &ev)?;
        queries::log_operation(
            &pool.conn,
            "clock",
            &format!("person:{}", person),
            &format!("{} {} {} ({})", ev.date_str(), ev.time_str(), ev.kind.label(), id),
        );

        success(format!(
            "Recorded {} for person {} at {} {}",
            ev.kind.label(),
            person,
            ev.date_str(),
            ev.time_str()
        ));
    }
    Ok(())
}
