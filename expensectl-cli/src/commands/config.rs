//! `expensectl config` - inspect and initialize configuration

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use expensectl_core::config::config_dir;
use expensectl_core::ExpensectlConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration (credentials redacted)
    Show,
    /// Show config file path
    Path,
    /// Write a default config file to ~/.expensectl/config.toml
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn config_path() -> Result<PathBuf> {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .context("Could not determine home directory")
}

fn redacted(mut config: ExpensectlConfig) -> ExpensectlConfig {
    if config.database.url.is_some() {
        config.database.url = Some(config.database.redacted_endpoint());
    }
    if !config.database.password.is_empty() {
        config.database.password = "***".to_string();
    }
    config
}

fn run_show() -> Result<()> {
    let config = ExpensectlConfig::load().context("Failed to load configuration")?;
    print!("{}", redacted(config).to_toml()?);
    Ok(())
}

fn run_path() -> Result<()> {
    let path = config_path()?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(not created yet; run `expensectl config init`)");
    }
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let path = config_path()?;

    if path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = ExpensectlConfig::default().to_toml()?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote default config to {}", path.display());
    Ok(())
}
