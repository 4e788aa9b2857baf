//! Dashboard CLI - Exercise dashboard data subscriptions from the terminal.
//!
//! Commands:
//! - `dashboard fetch` - Subscribe to a resource and print state transitions
//! - `dashboard clients` - Filter and sort the client list
//! - `dashboard summary` - Show overview numbers
//! - `dashboard config` - Manage configuration

mod commands;
mod config;
mod context;
mod listing;
mod output;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard_observability::{init_logging, LogLevel};

use commands::{ClientsArgs, ConfigArgs, FetchArgs};

/// Dashboard CLI - Load merchant data through safe fetch subscriptions
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subscribe to a resource and watch it load
    Fetch(FetchArgs),

    /// List clients with search, filter and sort
    Clients(ClientsArgs),

    /// Show overview numbers for the store
    Summary,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.verbose {
        logging = logging.with_level(LogLevel::Debug);
    }
    init_logging(&logging);

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args, &ctx).await,
        Commands::Clients(args) => commands::clients::run(args, &ctx).await,
        Commands::Summary => commands::summary::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
