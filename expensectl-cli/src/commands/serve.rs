//! HTTP server command
//!
//! Owns the pool lifecycle: initialize once, serve until a shutdown signal,
//! then close the pool.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use expensectl_core::ExpensectlConfig;
use expensectl_server::http::{run_server, ServerConfig};
use expensectl_server::Database;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections (overrides config)
    #[arg(long)]
    pub max_connections: Option<u32>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = ExpensectlConfig::load().context("Failed to load configuration")?;

    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }
    if let Some(max) = args.max_connections {
        config.database.max_connections = max;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.cors_permissive {
        config.server.cors_permissive = true;
    }

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.redacted_endpoint(),
        "Starting expensectl server"
    );

    let db: Arc<Database> = Arc::new(Database::new());
    db.init_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    // Run server (blocks until shutdown)
    let served = run_server(db.clone(), ServerConfig::from(&config.server)).await;

    db.close_pool().await;
    served.context("Server error")?;

    Ok(())
}
