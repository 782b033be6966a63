use super::event_kind::EventKind;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// One raw clock event, exactly as recorded by a device or a manual entry.
/// Immutable once stored; the reconciliation engine never mutates it.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEvent {
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDate,     // ⇔ attendance_events.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,     // ⇔ attendance_events.time (TEXT "HH:MM:SS")
    pub kind: EventKind,     // normalized from motive/motive_code
    pub motive: String,      // raw motive text as received
    pub motive_code: Option<i64>,
    pub manual: bool,        // ⇔ attendance_events.manual (INT 0/1)
    pub note: String,        // observation attached to manual entries
    pub created_at: String,  // TEXT, ISO8601
}

impl AttendanceEvent {
    /// High-level constructor for events recorded via the CLI.
    pub fn new(
        person_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        motive: &str,
        motive_code: Option<i64>,
        manual: bool,
        note: &str,
    ) -> Self {
        Self {
            id: 0,
            person_id,
            date,
            time,
            kind: EventKind::from_motive(motive, motive_code),
            motive: motive.to_string(),
            motive_code,
            manual,
            note: note.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}
