//! readlater MCP server entry point.
//!
//! Boots the bookmark store, the open-request coordinator and the MCP server
//! on stdio transport. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use readlater_client::Coordinator;
use readlater_core::{AppConfig, SyncDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(db_path = %config.db_path.display(), "Starting readlater server on stdio transport");

    let db = SyncDb::open(&config.db_path, config.quota()).await?;

    let opener = readlater_client::from_config(&config).await;
    let (open_sender, _coordinator) = Coordinator::new(opener, config.restore_policy()).spawn(16);

    let state = state::AppState::initialize(Arc::new(db), &config, open_sender).await?;
    let handler = handler::ReadLaterServer::new(Arc::new(state));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
