use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::event_kind::EventKind;
use crate::models::schedule::{DayWindow, ShiftTemplate};
use crate::utils::time::parse_time;
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Result, Row};

/// Column prefixes of the seven template slots, Monday=0 .. Sunday=6.
/// Order must match the weekday convention in `models::schedule`.
pub const DAY_PREFIXES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

// ---------------------------------------------------------------------
// Attendance events
// ---------------------------------------------------------------------

pub fn insert_event(conn: &Connection, ev: &AttendanceEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance_events
            (person_id, date, time, kind, motive, motive_code, manual, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            ev.person_id,
            ev.date.format("%Y-%m-%d").to_string(),
            ev.time.format("%H:%M:%S").to_string(),
            ev.kind.to_db_str(),
            ev.motive,
            ev.motive_code,
            if ev.manual { 1 } else { 0 },
            ev.note,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Events of one person inside an inclusive date range, in chronological
/// order. Unclassified events are included: the engine decides what they
/// count for.
pub fn load_events_for(
    conn: &Connection,
    person_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_events
         WHERE person_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, time ASC",
    )?;

    let rows = stmt.query_map(
        params![
            person_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_event_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Newest-first event listing for the history display.
pub fn load_history(
    conn: &Connection,
    person_id: i64,
    limit: i64,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_events
         WHERE person_id = ?1
         ORDER BY date DESC, time DESC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![person_id, limit], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_event_row(row: &Row) -> Result<AttendanceEvent> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = parse_time(&time_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(time_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid kind: {}", kind_str))),
        )
    })?;

    Ok(AttendanceEvent {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        date,
        time,
        kind,
        motive: row.get("motive")?,
        motive_code: row.get("motive_code")?,
        manual: row.get::<_, i64>("manual")? == 1,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

// ---------------------------------------------------------------------
// Shift templates and assignments
// ---------------------------------------------------------------------

pub fn insert_template(
    conn: &Connection,
    name: &str,
    active: bool,
    days: &[Option<DayWindow>; 7],
) -> AppResult<i64> {
    let mut cols = vec!["name".to_string(), "active".to_string()];
    let mut vals: Vec<Option<String>> = Vec::new();
    for (i, prefix) in DAY_PREFIXES.iter().enumerate() {
        cols.push(format!("{}_entrance", prefix));
        cols.push(format!("{}_exit", prefix));
        cols.push(format!("{}_meal_start", prefix));
        cols.push(format!("{}_meal_end", prefix));
        match &days[i] {
            Some(w) => {
                vals.push(Some(w.entrance.format("%H:%M").to_string()));
                vals.push(Some(w.exit.format("%H:%M").to_string()));
                vals.push(w.meal_start.map(|t| t.format("%H:%M").to_string()));
                vals.push(w.meal_end.map(|t| t.format("%H:%M").to_string()));
            }
            None => {
                for _ in 0..4 {
                    vals.push(None);
                }
            }
        }
    }

    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO shift_templates ({}) VALUES ({})",
        cols.join(", "),
        placeholders.join(", ")
    );

    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![
        Box::new(name.to_string()),
        Box::new(if active { 1i64 } else { 0 }),
    ];
    for v in vals {
        params_vec.push(Box::new(v));
    }

    let res = conn.execute(
        &sql,
        rusqlite::params_from_iter(params_vec.iter().map(|b| b.as_ref())),
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "a shift template named '{}' already exists",
            name
        ))),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

pub fn list_templates(conn: &Connection) -> AppResult<Vec<ShiftTemplate>> {
    let mut stmt = conn.prepare("SELECT * FROM shift_templates ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_template_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_template(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM shift_templates WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(AppError::NotFound(format!("shift template {}", id)));
    }
    Ok(())
}

/// Replace a person's assignment in one statement. UNIQUE(person_id) plus
/// ON CONFLICT keeps "one active template per person" without the
/// delete-then-insert dance.
pub fn upsert_assignment(
    conn: &Connection,
    person_id: i64,
    template_id: i64,
    role_name: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO assignments (person_id, template_id, role_name, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(person_id) DO UPDATE SET
             template_id = excluded.template_id,
             role_name   = excluded.role_name,
             updated_at  = excluded.updated_at",
        params![
            person_id,
            template_id,
            role_name,
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

/// The template currently assigned to a person, if any. Inactive templates
/// resolve to "no schedule" just like a missing assignment.
pub fn load_template_for_person(
    conn: &Connection,
    person_id: i64,
) -> AppResult<Option<ShiftTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT t.* FROM shift_templates t
         JOIN assignments a ON a.template_id = t.id
         WHERE a.person_id = ?1 AND t.active = 1
         LIMIT 1",
    )?;

    let mut rows = stmt.query_map([person_id], map_template_row)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn map_template_row(row: &Row) -> Result<ShiftTemplate> {
    let mut days: [Option<DayWindow>; 7] = [None; 7];

    for (i, prefix) in DAY_PREFIXES.iter().enumerate() {
        let entrance: Option<String> = row.get(format!("{}_entrance", prefix).as_str())?;
        let exit: Option<String> = row.get(format!("{}_exit", prefix).as_str())?;
        let meal_start: Option<String> = row.get(format!("{}_meal_start", prefix).as_str())?;
        let meal_end: Option<String> = row.get(format!("{}_meal_end", prefix).as_str())?;

        // A weekday is scheduled only when both bounds parse; a slot with
        // bogus text behaves like an unscheduled day.
        days[i] = match (
            entrance.as_deref().and_then(parse_time),
            exit.as_deref().and_then(parse_time),
        ) {
            (Some(entrance), Some(exit)) => Some(DayWindow {
                entrance,
                exit,
                meal_start: meal_start.as_deref().and_then(parse_time),
                meal_end: meal_end.as_deref().and_then(parse_time),
            }),
            _ => None,
        };
    }

    Ok(ShiftTemplate {
        id: row.get("id")?,
        name: row.get("name")?,
        active: row.get::<_, i64>("active")? == 1,
        days,
    })
}

// ---------------------------------------------------------------------
// Operation log
// ---------------------------------------------------------------------

pub fn log_operation(conn: &Connection, operation: &str, target: &str, message: &str) {
    // Logging must never fail the operation it records.
    let _ = conn.execute(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
        params![Local::now().to_rfc3339(), operation, target, message],
    );
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<(String, String, String, String)>> {
    let mut stmt =
        conn.prepare("SELECT date, operation, target, message FROM log ORDER BY date DESC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
