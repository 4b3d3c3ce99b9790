//! Data-access error kinds
//!
//! Each failure mode is its own variant so the HTTP layer can map them to
//! distinct status codes.

use thiserror::Error;

/// Result type for data-access operations
pub type DbResult<T> = Result<T, DbError>;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// No pool installed: `init_pool()` not called yet, or the pool was closed
    #[error("database pool is not initialized; call init_pool() first")]
    Uninitialized,

    #[error("database pool is already initialized")]
    AlreadyInitialized,

    #[error("invalid database configuration: {0}")]
    Config(String),

    /// Pool could not be established at startup
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: sqlx::Error,
    },

    /// Pool exhausted, acquire timed out, or the store is unreachable
    #[error("failed to acquire a connection: {0}")]
    Acquire(#[source] sqlx::Error),

    /// Query or commit failed
    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),

    /// Rolling back after `original` failed as well
    #[error("rollback failed ({rollback}) after: {original}")]
    Rollback {
        original: Box<DbError>,
        #[source]
        rollback: sqlx::Error,
    },
}

impl DbError {
    /// True when the pool itself is missing or unable to hand out connections.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Acquire(_))
    }
}
