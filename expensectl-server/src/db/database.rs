//! Database handle and scoped transaction context
//!
//! A `Database` owns at most one pool. It starts empty, gets its pool from
//! `init_pool()` at startup, and gives it up in `close_pool()` at shutdown.
//! Every query runs inside `run_scoped`, which pairs each checkout with
//! exactly one commit or rollback and always releases the connection.

use futures::future::BoxFuture;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use expensectl_core::DatabaseConfig;

use super::error::{DbError, DbResult};
use super::pool::{create_pool, ConnectionPool};

/// Shared data-access handle.
///
/// Share it as `Arc<Database>`; the handle itself is never mutated except by
/// `init_pool`/`close_pool`.
pub struct Database<P: ConnectionPool = PgPool> {
    pool: RwLock<Option<P>>,
}

impl<P: ConnectionPool> Default for Database<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ConnectionPool> Database<P> {
    /// Create a handle with no pool. Operations fail with `Uninitialized`
    /// until one is installed.
    pub fn new() -> Self {
        debug!("Database handle created");
        Self {
            pool: RwLock::new(None),
        }
    }

    /// Create a handle around an already-built pool.
    pub fn with_pool(pool: P) -> Self {
        Self {
            pool: RwLock::new(Some(pool)),
        }
    }

    /// Install a pool on an empty handle.
    pub async fn install(&self, pool: P) -> DbResult<()> {
        let mut slot = self.pool.write().await;
        if slot.is_some() {
            return Err(DbError::AlreadyInitialized);
        }
        *slot = Some(pool);
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.pool.read().await.is_some()
    }

    /// Detach the pool, then drain and close it.
    ///
    /// Later operations fail with `Uninitialized`. Scopes already running
    /// hold their own pool handle and finish normally; closing waits for
    /// their connections. Closing an empty handle does nothing.
    pub async fn close_pool(&self) {
        let Some(pool) = self.pool.write().await.take() else {
            debug!("close_pool called with no pool installed");
            return;
        };

        info!("Closing database connection pool...");
        pool.shutdown().await;
        info!("Database connection pool closed.");
    }

    async fn pool(&self) -> DbResult<P> {
        match self.pool.read().await.as_ref() {
            Some(pool) => Ok(pool.clone()),
            None => {
                error!("Database pool is not initialized. Call init_pool() first.");
                Err(DbError::Uninitialized)
            }
        }
    }

    /// Run `work` inside one transaction on one pooled connection.
    ///
    /// - With `commit`, a successful `work` is committed; otherwise the
    ///   transaction is rolled back, so read-only scopes never persist writes.
    /// - When `work` or the commit fails, the transaction is rolled back and
    ///   the original error is returned. If the rollback fails too, both come
    ///   back as `DbError::Rollback`.
    /// - The connection is released on every path.
    pub async fn run_scoped<T, F>(&self, commit: bool, work: F) -> DbResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut P::Connection) -> BoxFuture<'c, DbResult<T>> + Send,
    {
        let pool = self.pool().await?;

        let mut conn = pool.checkout().await.map_err(|e| {
            error!(error = %e, "Failed to acquire database connection");
            DbError::Acquire(e)
        })?;
        debug!(commit, "Acquired connection from the pool");

        let outcome = work(&mut conn).await;

        let result = match outcome {
            Ok(value) if commit => {
                debug!("Committing transaction...");
                match pool.commit(conn).await {
                    Ok(()) => Ok(value),
                    Err(e) => {
                        error!(error = %e, "Commit failed; transaction rolled back");
                        Err(DbError::Query(e))
                    }
                }
            }
            Ok(value) => {
                if let Err(e) = pool.rollback(conn).await {
                    warn!(error = %e, "Rollback of read-only transaction failed");
                }
                Ok(value)
            }
            Err(original) => {
                error!(error = %original, "Database error; rolling back");
                match pool.rollback(conn).await {
                    Ok(()) => Err(original),
                    Err(rollback) => {
                        error!(error = %rollback, "Rollback failed");
                        Err(DbError::Rollback {
                            original: Box::new(original),
                            rollback,
                        })
                    }
                }
            }
        };

        debug!("Connection released back to the pool.");
        result
    }
}

impl Database<PgPool> {
    /// Connect a PostgreSQL pool and install it.
    ///
    /// Failure is returned as-is (no retry); startup should not continue.
    pub async fn init_pool(&self, config: &DatabaseConfig) -> DbResult<()> {
        config
            .validate()
            .map_err(|e| DbError::Config(e.to_string()))?;

        let mut slot = self.pool.write().await;
        if slot.is_some() {
            return Err(DbError::AlreadyInitialized);
        }

        let endpoint = config.redacted_endpoint();
        info!(%endpoint, "Initializing database connection pool...");

        let pool = create_pool(config).await.map_err(|source| {
            error!(%endpoint, error = %source, "Error initializing pool");
            DbError::Connect {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        *slot = Some(pool);
        info!(
            min = config.min_connections,
            max = config.max_connections,
            "Database connection pool initialized."
        );
        Ok(())
    }
}
