//! Connection pool seam
//!
//! `ConnectionPool` is the narrow surface the scoped transaction context needs
//! from a pool engine: hand out a connection with a transaction open on it,
//! and end that transaction. A connection goes back to its pool when the
//! value is dropped, so every exit path releases it, cancellation included.
//!
//! Production uses sqlx's `PgPool`; tests plug in a counting pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Pool, Postgres, Transaction};

use expensectl_core::DatabaseConfig;

/// Pool engine operations used by `Database::run_scoped`.
#[async_trait]
pub trait ConnectionPool: Clone + Send + Sync + 'static {
    /// A checked-out connection with an open transaction.
    type Connection: Send;

    /// Acquire a connection (waiting for a free slot) and begin a transaction.
    async fn checkout(&self) -> Result<Self::Connection, sqlx::Error>;

    /// Commit and release. A failed commit leaves no transaction open.
    async fn commit(&self, conn: Self::Connection) -> Result<(), sqlx::Error>;

    /// Roll back and release.
    async fn rollback(&self, conn: Self::Connection) -> Result<(), sqlx::Error>;

    /// Drain and close every pooled connection.
    ///
    /// Waits for checked-out connections to come back first.
    async fn shutdown(&self);
}

#[async_trait]
impl ConnectionPool for PgPool {
    type Connection = Transaction<'static, Postgres>;

    async fn checkout(&self) -> Result<Self::Connection, sqlx::Error> {
        Pool::begin(self).await
    }

    async fn commit(&self, conn: Self::Connection) -> Result<(), sqlx::Error> {
        conn.commit().await
    }

    async fn rollback(&self, conn: Self::Connection) -> Result<(), sqlx::Error> {
        conn.rollback().await
    }

    async fn shutdown(&self) {
        Pool::close(self).await;
    }
}

/// Build connect options from the individual config fields.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

/// Create a PostgreSQL connection pool.
///
/// `config.url` wins over the individual fields when set. The first
/// `min_connections` connections are opened eagerly, so an unreachable store
/// fails here rather than on the first request.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

    match &config.url {
        Some(url) => options.connect(url).await,
        None => options.connect_with(connect_options(config)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_carry_config_fields() {
        let config = DatabaseConfig {
            host: "db.internal".into(),
            port: 5433,
            user: "tracker".into(),
            name: "expenses".into(),
            ..DatabaseConfig::default()
        };
        let options = connect_options(&config);

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "tracker");
        assert_eq!(options.get_database(), Some("expenses"));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p expensectl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_checkout_and_rollback() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let config = DatabaseConfig {
            url: Some(url),
            ..DatabaseConfig::default()
        };
        let pool = create_pool(&config).await.expect("pool creation failed");

        let mut tx = pool.checkout().await.expect("checkout failed");
        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&mut *tx)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);

        ConnectionPool::rollback(&pool, tx)
            .await
            .expect("rollback failed");
        assert!(pool.size() >= 1);
        pool.shutdown().await;
    }
}
