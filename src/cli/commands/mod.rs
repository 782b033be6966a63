pub mod assign;
pub mod clock;
pub mod config;
pub mod db;
pub mod history;
pub mod init;
pub mod log;
pub mod report;
pub mod request;
pub mod resolve;
pub mod template;
