pub mod event;
pub mod event_kind;
pub mod report;
pub mod request;
pub mod schedule;
