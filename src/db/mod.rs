pub mod approvals;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod queries;
