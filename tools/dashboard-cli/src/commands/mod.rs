//! CLI command implementations.

pub mod clients;
pub mod config;
pub mod fetch;
pub mod summary;

use clap::{Args, Subcommand, ValueEnum};

use crate::scenario::Scenario;

/// Resources the dashboard loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Products,
    Orders,
    Clients,
    Notifications,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Products => "products",
            Resource::Orders => "orders",
            Resource::Clients => "clients",
            Resource::Notifications => "notifications",
        }
    }
}

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Resource to load.
    #[arg(value_enum)]
    pub resource: Resource,

    /// Simulated backend behaviour.
    #[arg(short, long, value_enum, default_value_t = Scenario::Ok)]
    pub scenario: Scenario,

    /// Trigger a manual refetch after this many seconds.
    #[arg(long)]
    pub refetch_after: Option<u64>,
}

/// Arguments for the clients command.
#[derive(Args)]
pub struct ClientsArgs {
    /// Match against name, email or company.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only clients with this status (active, inactive, lead).
    #[arg(long)]
    pub status: Option<String>,

    /// Sort field (name, spent, orders, joined).
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File to create (default: dashboard.toml). A `.json` path writes JSON.
        #[arg(long)]
        path: Option<String>,
    },
    /// Validate the config file.
    Validate,
}
