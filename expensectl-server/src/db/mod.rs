//! Database layer - connection pool, scoped transactions, expense queries
//!
//! # Design Principles
//!
//! - One pool per process, owned by an explicitly passed `Database` handle
//! - Every query runs inside `Database::run_scoped` (one transaction, one connection)
//! - Bind parameters only, never formatted SQL
//! - Multi-step writes share a transaction

pub mod database;
pub mod error;
pub mod expenses;
pub mod pool;

#[cfg(test)]
pub(crate) mod memory;

pub use database::Database;
pub use error::{DbError, DbResult};
pub use expenses::ExpenseStore;
pub use pool::{create_pool, ConnectionPool};
