//! expensectl-server: pooled data access and the expense HTTP API
//!
//! - `db`: connection pool, scoped transactions, expense operations
//! - `http`: axum router, handlers, JSON errors

pub mod db;
pub mod http;

pub use db::{Database, DbError, DbResult, ExpenseStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
