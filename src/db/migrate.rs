//! Schema creation and upgrades. Every table is guarded by
//! CREATE TABLE IF NOT EXISTS so re-running migrations is harmless.

use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id   INTEGER NOT NULL,
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            kind        TEXT NOT NULL
                        CHECK(kind IN ('entrance','exit','meal_out','meal_in','unclassified')),
            motive      TEXT NOT NULL DEFAULT '',
            motive_code INTEGER,
            manual      INTEGER NOT NULL DEFAULT 0,
            note        TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_person_date ON attendance_events(person_id, date);
        CREATE INDEX IF NOT EXISTS idx_events_date_time   ON attendance_events(date, time);
        "#,
    )?;
    Ok(())
}

fn ensure_template_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shift_templates (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL UNIQUE,
            active INTEGER NOT NULL DEFAULT 1,
            mon_entrance TEXT, mon_exit TEXT, mon_meal_start TEXT, mon_meal_end TEXT,
            tue_entrance TEXT, tue_exit TEXT, tue_meal_start TEXT, tue_meal_end TEXT,
            wed_entrance TEXT, wed_exit TEXT, wed_meal_start TEXT, wed_meal_end TEXT,
            thu_entrance TEXT, thu_exit TEXT, thu_meal_start TEXT, thu_meal_end TEXT,
            fri_entrance TEXT, fri_exit TEXT, fri_meal_start TEXT, fri_meal_end TEXT,
            sat_entrance TEXT, sat_exit TEXT, sat_meal_start TEXT, sat_meal_end TEXT,
            sun_entrance TEXT, sun_exit TEXT, sun_meal_start TEXT, sun_meal_end TEXT
        );

        CREATE TABLE IF NOT EXISTS assignments (
            person_id   INTEGER PRIMARY KEY,
            template_id INTEGER NOT NULL REFERENCES shift_templates(id),
            role_name   TEXT NOT NULL DEFAULT '',
            updated_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_request_tables(conn: &Connection) -> Result<()> {
    // Two collections with the same shape; the approval machine picks the
    // table and key column through RequestKind.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS permissions (
            id_permission      INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id          INTEGER NOT NULL,
            status             TEXT NOT NULL DEFAULT 'Pending'
                               CHECK(status IN ('Pending','Approved','Rejected')),
            reason             TEXT NOT NULL,
            start_date         TEXT NOT NULL,
            end_date           TEXT NOT NULL,
            approver_id        INTEGER,
            resolution_comment TEXT,
            resolved_at        TEXT,
            created_at         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS incidents (
            id_incident        INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id          INTEGER NOT NULL,
            status             TEXT NOT NULL DEFAULT 'Pending'
                               CHECK(status IN ('Pending','Approved','Rejected')),
            reason             TEXT NOT NULL,
            start_date         TEXT NOT NULL,
            end_date           TEXT NOT NULL,
            approver_id        INTEGER,
            resolution_comment TEXT,
            resolved_at        TEXT,
            created_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_permissions_status ON permissions(status);
        CREATE INDEX IF NOT EXISTS idx_incidents_status   ON incidents(status);
        "#,
    )?;
    Ok(())
}

/// Check whether a table exists (used by `db --check`).
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let found: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_events_table(conn)?;
    ensure_template_tables(conn)?;
    ensure_request_tables(conn)?;
    Ok(())
}
