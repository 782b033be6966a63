use chrono::NaiveDate;
use serde::Serialize;

/// Discriminator between the two request collections. Both tables share
/// the same row shape; the kind resolves which table and which primary-key
/// column a transition touches.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RequestKind {
    Permission,
    Incident,
}

impl RequestKind {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "permission" | "permiso" => Some(Self::Permission),
            "incident" | "incidencia" => Some(Self::Incident),
            _ => None,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            RequestKind::Permission => "permissions",
            RequestKind::Incident => "incidents",
        }
    }

    pub fn key_column(&self) -> &'static str {
        match self {
            RequestKind::Permission => "id_permission",
            RequestKind::Incident => "id_incident",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Permission => "permission",
            RequestKind::Incident => "incident",
        }
    }
}

/// Request lifecycle. `Pending` is the only live state; the two terminal
/// states are absorbing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(RequestStatus::Pending),
            "Approved" => Some(RequestStatus::Approved),
            "Rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// A leave/incident request row as read from its table.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub id: i64,
    pub kind: RequestKind,
    pub person_id: i64,
    pub status: RequestStatus,
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub approver_id: Option<i64>,
    pub resolution_comment: Option<String>,
    pub resolved_at: Option<String>,
    pub created_at: String,
}
