//! Trove CLI
//!
//! Command-line interface for the Trove item catalog. With no subcommand
//! it drops into the interactive menu.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trove_core::{Config, FileCache, HttpRemote, ItemStore, RemoteSource, SyncCoordinator};

mod commands;
mod menu;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "trove")]
#[command(about = "Trove - item catalog with dynamic properties")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all items
    #[command(alias = "ls")]
    List,
    /// Create a new item
    #[command(alias = "add")]
    Create {
        /// Item name
        name: String,
        /// Properties as name=value pairs
        #[arg(short, long = "prop", value_name = "NAME=VALUE")]
        prop: Vec<String>,
    },
    /// Delete an item by id
    #[command(alias = "rm")]
    Delete {
        /// Item id
        id: String,
    },
    /// List all property names across the catalog
    #[command(alias = "props")]
    Properties,
    /// Search the catalog
    Search {
        #[command(subcommand)]
        command: SearchCommands,
    },
    /// Refresh the catalog from the remote source
    Sync,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum SearchCommands {
    /// Values of properties whose name contains the fragment
    Name {
        /// Property name fragment
        fragment: String,
    },
    /// Items with a property equal to the value
    Value {
        /// Exact property value
        value: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, remote_url, request_timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Shared application state: the store, its coordinator, and the remote
pub struct App {
    pub store: Arc<ItemStore>,
    pub coordinator: SyncCoordinator,
    pub remote: Arc<HttpRemote>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let Some(ref url) = config.remote_url else {
            anyhow::bail!(
                "No remote source configured. Set one with:\n  \
                 trove config set remote_url https://your-server/api"
            );
        };

        let remote = Arc::new(
            HttpRemote::new(url, config.timeout()).context("Failed to build HTTP client")?,
        );
        let cache = Arc::new(FileCache::new(config.cache_path()));
        let store = Arc::new(ItemStore::new());

        let remote_source: Arc<dyn RemoteSource> = remote.clone();
        let coordinator = SyncCoordinator::new(Arc::clone(&store), remote_source, cache);

        Ok(Self {
            store,
            coordinator,
            remote,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store or a configured remote
    if let Some(Commands::Config { command }) = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, &output)
            }
        };
    }

    let config = Config::load().context("Failed to load configuration")?;
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
    let app = App::new(&config)?;

    // Interactive menu when no subcommand is given
    let Some(command) = cli.command else {
        return menu::run(&app, &output).await;
    };

    // One refresh per invocation, started up front; every handler joins
    // before touching the store.
    app.coordinator.start_refresh().await;

    match command {
        Commands::List => commands::item::list(&app, &output).await,
        Commands::Create { name, prop } => commands::item::create(&app, name, prop, &output).await,
        Commands::Delete { id } => commands::item::delete(&app, id, &output).await,
        Commands::Properties => commands::search::properties(&app, &output).await,
        Commands::Search { command } => match command {
            SearchCommands::Name { fragment } => {
                commands::search::by_name(&app, fragment, &output).await
            }
            SearchCommands::Value { value } => {
                commands::search::by_value(&app, value, &output).await
            }
        },
        Commands::Sync => commands::sync::run(&app, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}
