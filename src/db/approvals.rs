//! Request persistence and the guarded status transition.

use crate::approval::{TransitionOutcome, TransitionRequest};
use crate::errors::{AppError, AppResult};
use crate::models::request::{Request, RequestKind, RequestStatus};
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

pub fn create_request(
    conn: &Connection,
    kind: RequestKind,
    person_id: i64,
    reason: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<i64> {
    let sql = format!(
        "INSERT INTO {} (person_id, status, reason, start_date, end_date, created_at)
         VALUES (?1, 'Pending', ?2, ?3, ?4, ?5)",
        kind.table()
    );
    conn.execute(
        &sql,
        params![
            person_id,
            reason,
            start_date.format("%Y-%m-%d").to_string(),
            end_date.format("%Y-%m-%d").to_string(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_request(conn: &Connection, kind: RequestKind, id: i64) -> AppResult<Option<Request>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?1 LIMIT 1",
        kind.table(),
        kind.key_column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let req = stmt
        .query_row([id], |row| map_request_row(row, kind))
        .optional()?;
    Ok(req)
}

/// Pending counts as (permissions, incidents).
pub fn count_pending(conn: &Connection) -> AppResult<(i64, i64)> {
    let permissions: i64 = conn.query_row(
        "SELECT COUNT(*) FROM permissions WHERE status = 'Pending'",
        [],
        |row| row.get(0),
    )?;
    let incidents: i64 = conn.query_row(
        "SELECT COUNT(*) FROM incidents WHERE status = 'Pending'",
        [],
        |row| row.get(0),
    )?;
    Ok((permissions, incidents))
}

/// Apply one status transition as a single conditional update.
///
/// The `status = 'Pending'` filter lives inside the UPDATE itself, so two
/// racing decisions cannot both win: the loser sees zero rows affected and
/// gets a `Conflict` (or `NotFound` when the id never existed). A blank
/// comment leaves any previously stored comment untouched.
pub fn resolve_request(
    conn: &Connection,
    req: &TransitionRequest,
) -> AppResult<TransitionOutcome> {
    let new_status = req.decision.target_status();
    let comment = req.comment.as_deref().map(str::trim).unwrap_or("");
    let resolved_at = Local::now().to_rfc3339();

    let sql = format!(
        "UPDATE {table}
            SET status = ?1,
                approver_id = ?2,
                resolved_at = ?3,
                resolution_comment = CASE WHEN ?4 = ''
                                          THEN resolution_comment
                                          ELSE ?4 END
          WHERE {key} = ?5 AND status = 'Pending'",
        table = req.kind.table(),
        key = req.kind.key_column(),
    );

    let affected = conn.execute(
        &sql,
        params![
            new_status.to_db_str(),
            req.approver_id,
            resolved_at,
            comment,
            req.id
        ],
    )?;

    if affected == 1 {
        return Ok(TransitionOutcome {
            kind: req.kind,
            id: req.id,
            new_status,
            approver_id: req.approver_id,
            comment: if comment.is_empty() {
                None
            } else {
                Some(comment.to_string())
            },
        });
    }

    // Zero rows: either the row is already resolved or it never existed.
    match load_request(conn, req.kind, req.id)? {
        Some(row) => Err(AppError::Conflict(format!(
            "{} {} is already {}",
            req.kind.label(),
            req.id,
            row.status.to_db_str()
        ))),
        None => Err(AppError::NotFound(format!(
            "{} {}",
            req.kind.label(),
            req.id
        ))),
    }
}

fn map_request_row(row: &Row, kind: RequestKind) -> Result<Request> {
    let status_str: String = row.get("status")?;
    let status = RequestStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid status: {}", status_str))),
        )
    })?;

    let parse_day = |field: &str| -> Result<NaiveDate> {
        let s: String = row.get(field)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s)),
            )
        })
    };

    Ok(Request {
        id: row.get(kind.key_column())?,
        kind,
        person_id: row.get("person_id")?,
        status,
        reason: row.get("reason")?,
        start_date: parse_day("start_date")?,
        end_date: parse_day("end_date")?,
        approver_id: row.get("approver_id")?,
        resolution_comment: row.get("resolution_comment")?,
        resolved_at: row.get("resolved_at")?,
        created_at: row.get("created_at")?,
    })
}
