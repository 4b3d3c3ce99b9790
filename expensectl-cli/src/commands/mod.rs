//! Command implementations for the expensectl CLI

pub mod analytics;
pub mod api;
pub mod config;
pub mod record;
#[cfg(feature = "server")]
pub mod serve;
pub mod show;

// Re-export main dispatcher functions for flat access from main.rs
pub use analytics::run_analytics;
pub use config::run_config;
pub use record::run_record;
#[cfg(feature = "server")]
pub use serve::run_serve;
pub use show::run_show;
