//! Configuration loading
//!
//! Priority order (highest to lowest):
//! 1. CLI flags (applied by the caller)
//! 2. Environment (`EXPENSECTL_DB_*`, `DATABASE_URL`), including `.env` files
//! 3. `./expensectl.toml`
//! 4. `~/.expensectl/config.toml`
//! 5. Built-in defaults

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, Result};

/// Load environment variables from .env files.
///
/// The current directory wins over `~/.expensectl/.env`; variables that are
/// already set are never overwritten.
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|d| d.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if !loaded_from.is_empty() {
        info!(files = loaded_from.len(), "Loaded .env configuration");
    }
}

/// The expensectl config directory (`~/.expensectl`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".expensectl"))
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensectlConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub server: ServerSection,
}

/// Backing-store connection parameters and pool bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL; wins over the individual fields when set
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// How long an acquire may wait for a free connection
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "127.0.0.1".to_string(),
            port: 3307,
            user: "root".to_string(),
            password: "root".to_string(),
            name: "expense_manager".to_string(),
            min_connections: 1,
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Check the pool bounds make sense.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(CoreError::config("max_connections must be at least 1"));
        }
        if self.acquire_timeout_secs == 0 {
            return Err(CoreError::config("acquire_timeout_secs must be at least 1"));
        }
        if self.min_connections > self.max_connections {
            return Err(CoreError::config(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }

    /// Endpoint description safe for logs (no credentials)
    pub fn redacted_endpoint(&self) -> String {
        match &self.url {
            Some(url) => match url.rsplit_once('@') {
                Some((_, host)) => format!("postgres://***@{}", host),
                None => url.clone(),
            },
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,

    /// Allow any CORS origin (default: localhost only)
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_permissive: false,
        }
    }
}

/// Recursive table merge: nested tables combine, any other value in
/// `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

impl ExpensectlConfig {
    /// Load config from TOML files, then apply the process environment.
    ///
    /// `./expensectl.toml` is layered over `~/.expensectl/config.toml`:
    /// only the keys it sets override. Unreadable or malformed files are
    /// logged and skipped.
    pub fn load() -> Result<Self> {
        let global = config_dir().map(|d| d.join("config.toml"));
        let local = PathBuf::from("expensectl.toml");
        let paths: Vec<PathBuf> = global.into_iter().chain(std::iter::once(local)).collect();

        let mut config = Self::load_layered(&paths)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Merge TOML files in order, later files winning key by key, then fill
    /// whatever none of them set from the defaults.
    pub fn load_layered(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = toml::Table::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::read_table(path) {
                Ok(layer) => {
                    debug!("Loaded config from {}", path.display());
                    merge_tables(&mut merged, layer);
                }
                Err(e) => warn!("Skipping config file: {}", e),
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| CoreError::config(e.to_string()))
    }

    /// Parse a single TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| CoreError::config_parse(path, e))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let contents = std::fs::read_to_string(path)?;
        contents
            .parse::<toml::Table>()
            .map_err(|e| CoreError::config_parse(path, e))
    }

    /// Overlay environment values using `lookup` (usually `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;

        if let Some(url) = lookup("DATABASE_URL") {
            db.url = Some(url);
        }
        if let Some(host) = lookup("EXPENSECTL_DB_HOST") {
            db.host = host;
        }
        if let Some(port) = lookup("EXPENSECTL_DB_PORT") {
            db.port = port
                .parse()
                .map_err(|_| CoreError::config(format!("EXPENSECTL_DB_PORT is not a port: {}", port)))?;
        }
        if let Some(user) = lookup("EXPENSECTL_DB_USER") {
            db.user = user;
        }
        if let Some(password) = lookup("EXPENSECTL_DB_PASSWORD") {
            db.password = password;
        }
        if let Some(name) = lookup("EXPENSECTL_DB_NAME") {
            db.name = name;
        }
        if let Some(min) = lookup("EXPENSECTL_DB_MIN_CONNECTIONS") {
            db.min_connections = min.parse().map_err(|_| {
                CoreError::config(format!("EXPENSECTL_DB_MIN_CONNECTIONS is not a number: {}", min))
            })?;
        }
        if let Some(max) = lookup("EXPENSECTL_DB_MAX_CONNECTIONS") {
            db.max_connections = max.parse().map_err(|_| {
                CoreError::config(format!("EXPENSECTL_DB_MAX_CONNECTIONS is not a number: {}", max))
            })?;
        }
        if let Some(secs) = lookup("EXPENSECTL_DB_ACQUIRE_TIMEOUT_SECS") {
            db.acquire_timeout_secs = secs.parse().map_err(|_| {
                CoreError::config(format!(
                    "EXPENSECTL_DB_ACQUIRE_TIMEOUT_SECS is not a number: {}",
                    secs
                ))
            })?;
        }

        Ok(())
    }

    /// Render as TOML (used by `expensectl config show`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::config(e.to_string()))
    }
}
