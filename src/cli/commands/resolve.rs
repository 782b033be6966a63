use crate::approval::{self, Decision, TransitionRequest};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{pool::DbPool, queries};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resolve {
        keys,
        action,
        approver,
        comment,
        json,
    } = cmd
    {
        let decision = Decision::from_str_opt(action).ok_or_else(|| {
            AppError::Validation(format!("invalid action '{}': use approve or reject", action))
        })?;

        let pool = DbPool::new(&cfg.database)?;
        let comment = comment.trim();

        // Single key: report the transition (or its conflict) directly.
        // Several keys: batch mode, skipped items never abort the run.
        if keys.len() == 1 {
            let (kind, id) = approval::parse_key(&keys[0])?;
            let req = TransitionRequest {
                kind,
                id,
                decision,
                approver_id: *approver,
                comment: if comment.is_empty() {
                    None
                } else {
                    Some(comment.to_string())
                },
            };

            let outcome = approval::resolve(&pool.conn, &req)?;
            queries::log_operation(
                &pool.conn,
                "resolve",
                &keys[0],
                outcome.new_status.to_db_str(),
            );

            if *json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                success(format!(
                    "{} {} is now {} (approver {})",
                    kind.label(),
                    id,
                    outcome.new_status.to_db_str(),
                    approver
                ));
            }
            return Ok(());
        }

        let bulk = approval::resolve_bulk(
            &pool.conn,
            keys,
            decision,
            *approver,
            if comment.is_empty() { None } else { Some(comment) },
        );
        for key in &bulk.changed {
            queries::log_operation(&pool.conn, "resolve", key, "changed");
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&bulk)?);
        } else {
            success(format!(
                "Changed {} of {} request(s)",
                bulk.changed.len(),
                keys.len()
            ));
            for item in &bulk.skipped {
                warning(format!("skipped {}: {}", item.key, item.reason));
            }
        }
    }
    Ok(())
}
