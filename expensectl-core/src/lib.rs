//! expensectl-core: domain layer for the expense tracker
//!
//! Models for the `expenses` table, request validation, the
//! spend-by-category breakdown, and configuration loading.

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use analytics::{breakdown, Breakdown, CategoryShare};
pub use config::{DatabaseConfig, ExpensectlConfig, ServerSection};
pub use error::{CoreError, Result};
pub use models::{CategoryTotal, DateRange, Expense, NewExpense};
pub use validation::ValidationError;
