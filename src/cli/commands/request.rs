use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{approvals, pool::DbPool, queries};
use crate::errors::{AppError, AppResult};
use crate::models::request::RequestKind;
use crate::ui::messages::{info, success};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Request {
        new,
        pending,
        kind,
        person,
        reason,
        from,
        to,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *pending {
            let (permissions, incidents) = approvals::count_pending(&pool.conn)?;
            info(format!("Pending permissions: {}", permissions));
            info(format!("Pending incidents:   {}", incidents));
        }

        if *new {
            let kind = RequestKind::from_str_opt(kind)
                .ok_or_else(|| AppError::InvalidRequestKind(kind.clone()))?;

            let person = person.ok_or_else(|| {
                AppError::Validation("a person id is required to create a request".into())
            })?;
            if person <= 0 {
                return Err(AppError::Validation(format!(
                    "person id must be positive, got {}",
                    person
                )));
            }

            let reason = reason.trim();
            if reason.is_empty() || reason.chars().count() > 300 {
                return Err(AppError::Validation(
                    "a reason is required and must be at most 300 characters".into(),
                ));
            }

            let start = match from {
                Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
                None => date::today(),
            };
            let end = match to {
                Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
                None => start,
            };
            if end < start {
                return Err(AppError::Validation(
                    "end date cannot precede start date".into(),
                ));
            }

            let id = approvals::create_request(&pool.conn, kind, person, reason, start, end)?;
            queries::log_operation(
                &pool.conn,
                "request-new",
                &format!("{}:{}", kind.label(), id),
                reason,
            );
            success(format!(
                "Created {} {} for person {} (Pending)",
                kind.label(),
                id,
                person
            ));
        }
    }
    Ok(())
}
