//! `stardog-mcp` binary: parses the command line and serves MCP on stdio.

use std::sync::Arc;

use clap::Parser;
use stardog_client::StardogClient;
use stardog_mcp::{Cli, StardogMcpServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = cli.client_config()?;
    tracing::info!(endpoint = config.endpoint(), "Connecting to Stardog");
    let client = StardogClient::new(config)?;

    StardogMcpServer::new(Arc::new(client)).serve_stdio().await
}
