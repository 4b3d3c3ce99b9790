//! expensectl CLI - expense tracker server and dashboard
//!
//! - `serve`: run the HTTP API over the PostgreSQL pool
//! - `show` / `record`: read and replace a day's expenses through the API
//! - `analytics`: spend-by-category table and bar chart for a date range
//! - `config`: inspect the merged configuration

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "expensectl",
    author,
    version,
    about = "Track daily expenses and see where the money goes",
    long_about = "Record expenses per day, serve them over a small JSON API backed by \
                  PostgreSQL, and break spending down by category over any date range."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Show the expenses recorded on a date
    Show(commands::show::ShowArgs),
    /// Replace a date's expenses with the given items
    Record(commands::record::RecordArgs),
    /// Spend by category over a date range
    Analytics(commands::analytics::AnalyticsArgs),
    /// Inspect expensectl configuration (show, path, init)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    expensectl_core::config::load_dotenv();

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Show(args) => commands::run_show(args).await?,
        Commands::Record(args) => commands::run_record(args).await?,
        Commands::Analytics(args) => commands::run_analytics(args).await?,
        Commands::Config(args) => commands::run_config(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
