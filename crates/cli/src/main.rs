//! readlater command-line interface.
//!
//! Works directly against the synced SQLite store; the MCP server and the
//! CLI can share one database file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use readlater_client::Coordinator;
use readlater_core::{AppConfig, BookmarkStore, SyncDb};
use tracing_subscriber::EnvFilter;

mod commands;

/// readlater - save pages and come back to where you left off.
#[derive(Parser)]
#[command(name = "readlater")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "READLATER_CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List saved links, newest first.
    List {
        /// Show at most this many links.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Save a page.
    Add {
        /// Page address.
        url: String,

        /// Page title (defaults to the address).
        #[arg(short, long)]
        title: Option<String>,

        /// Vertical scroll offset to restore.
        #[arg(short, long, default_value = "0")]
        scroll_top: u64,

        /// Icon URL.
        #[arg(long)]
        favicon: Option<String>,
    },

    /// Remove a saved link by key.
    Remove {
        /// Storage key (the page address).
        key: String,
    },

    /// Delete all saved links.
    Clear {
        /// Confirm deleting everything.
        #[arg(long)]
        yes: bool,
    },

    /// Open a page and restore its scroll offset.
    Open {
        /// Page address.
        url: String,

        /// Vertical scroll offset to restore.
        #[arg(short, long, default_value = "0")]
        scroll: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::from_default_env() };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(cli).await {
        Ok(out) => {
            if !out.is_empty() {
                println!("{}", out.trim_end());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let config = AppConfig::load_from(cli.config)?;
    tracing::debug!(db_path = %config.db_path.display(), "using database");

    match cli.command {
        Commands::List { limit } => commands::list(&mut open_store(&config).await?, &config.display(), limit).await,
        Commands::Add { url, title, scroll_top, favicon } => {
            commands::add(&mut open_store(&config).await?, &url, title, scroll_top, favicon).await
        }
        Commands::Remove { key } => commands::remove(&mut open_store(&config).await?, &key).await,
        Commands::Clear { yes } => commands::clear(&mut open_store(&config).await?, yes).await,
        Commands::Open { url, scroll } => {
            let opener = readlater_client::from_config(&config).await;
            let coordinator = Coordinator::new(Arc::clone(&opener), config.restore_policy());
            println!("{}", commands::open(&coordinator, &url, scroll).await?);
            commands::wait_for_close(opener.as_ref()).await;
            Ok(String::new())
        }
    }
}

async fn open_store(config: &AppConfig) -> Result<BookmarkStore> {
    let db = SyncDb::open(&config.db_path, config.quota()).await?;
    Ok(BookmarkStore::initialize(Arc::new(db)).await?)
}
