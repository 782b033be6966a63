//! Request approval state machine.
//!
//! Pending is the only live state; Approved and Rejected are absorbing.
//! The transition guard itself lives in `db::approvals::resolve_request`
//! (a conditional UPDATE); this module validates inputs, parses batch
//! keys, and keeps error attribution per item in bulk mode.

use crate::db::approvals;
use crate::errors::{AppError, AppResult};
use crate::models::request::{RequestKind, RequestStatus};
use rusqlite::Connection;
use serde::Serialize;

/// The two decisions an approver can take on a Pending request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn target_status(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

/// One validated transition to attempt.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub kind: RequestKind,
    pub id: i64,
    pub decision: Decision,
    pub approver_id: i64,
    pub comment: Option<String>,
}

impl TransitionRequest {
    /// Reject bad input before touching the store.
    pub fn validate(&self) -> AppResult<()> {
        if self.id <= 0 {
            return Err(AppError::Validation(format!(
                "request id must be positive, got {}",
                self.id
            )));
        }
        if self.approver_id <= 0 {
            return Err(AppError::Validation(format!(
                "approver id must be positive, got {}",
                self.approver_id
            )));
        }
        Ok(())
    }
}

/// Successful transition result, as handed back to callers.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    pub kind: RequestKind,
    pub id: i64,
    pub new_status: RequestStatus,
    pub approver_id: i64,
    pub comment: Option<String>,
}

/// Result of a batch run: what changed and what was skipped, with a reason
/// per skipped key. Partial success is expected, never rolled back.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BulkOutcome {
    pub changed: Vec<String>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedItem {
    pub key: String,
    pub reason: String,
}

/// Parse a `kind:id` batch key, e.g. `permission:5`.
pub fn parse_key(key: &str) -> AppResult<(RequestKind, i64)> {
    let (kind_str, id_str) = key
        .split_once(':')
        .ok_or_else(|| AppError::InvalidRequestKey(key.to_string()))?;

    let kind = RequestKind::from_str_opt(kind_str)
        .ok_or_else(|| AppError::InvalidRequestKind(kind_str.to_string()))?;

    let id: i64 = id_str
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidRequestKey(key.to_string()))?;

    Ok((kind, id))
}

/// Apply a single transition. Validation first, then the conditional
/// update; the caller gets a structured Conflict/NotFound rather than a
/// silent overwrite.
pub fn resolve(conn: &Connection, req: &TransitionRequest) -> AppResult<TransitionOutcome> {
    req.validate()?;
    approvals::resolve_request(conn, req)
}

/// Apply one decision to a list of `kind:id` keys, sequentially. Each key
/// succeeds or is skipped with a reason; nothing aborts the batch.
pub fn resolve_bulk(
    conn: &Connection,
    keys: &[String],
    decision: Decision,
    approver_id: i64,
    comment: Option<&str>,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();

    for key in keys {
        let (kind, id) = match parse_key(key) {
            Ok(parsed) => parsed,
            Err(e) => {
                outcome.skipped.push(SkippedItem {
                    key: key.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let req = TransitionRequest {
            kind,
            id,
            decision,
            approver_id,
            comment: comment.map(str::to_string),
        };

        match resolve(conn, &req) {
            Ok(_) => outcome.changed.push(key.clone()),
            Err(e) => outcome.skipped.push(SkippedItem {
                key: key.clone(),
                reason: e.to_string(),
            }),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_keys() {
        let (kind, id) = parse_key("permission:5").unwrap();
        assert_eq!(kind, RequestKind::Permission);
        assert_eq!(id, 5);

        let (kind, id) = parse_key("incident:12").unwrap();
        assert_eq!(kind, RequestKind::Incident);
        assert_eq!(id, 12);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(parse_key("badkind:5"), Err(AppError::InvalidRequestKind(_))));
        assert!(matches!(parse_key("permission"), Err(AppError::InvalidRequestKey(_))));
        assert!(matches!(parse_key("permission:x"), Err(AppError::InvalidRequestKey(_))));
    }

    #[test]
    fn validation_rejects_nonpositive_ids() {
        let req = TransitionRequest {
            kind: RequestKind::Permission,
            id: 0,
            decision: Decision::Approve,
            approver_id: 1,
            comment: None,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let req = TransitionRequest {
            kind: RequestKind::Permission,
            id: 3,
            decision: Decision::Approve,
            approver_id: -1,
            comment: None,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn decision_maps_to_terminal_status() {
        assert_eq!(Decision::Approve.target_status(), RequestStatus::Approved);
        assert_eq!(Decision::Reject.target_status(), RequestStatus::Rejected);
        assert!(Decision::Approve.target_status().is_terminal());
        assert_eq!(Decision::from_str_opt("cancel"), None);
    }
}
