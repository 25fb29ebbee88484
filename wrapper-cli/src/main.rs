use std::net::SocketAddr;

use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use wrapper_local_server::{start_server_http, ConfigError, StatusConfig};

mod claude_server;
mod signal;

use claude_server::ClaudeMcpServer;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("there was a problem with the provided config: {0}")]
    BadConfig(#[from] ConfigError),
    #[error("claude mcp serve failed: {0}")]
    ClaudeServer(#[from] claude_server::Error),
    #[error("could not bind {0}: {1}")]
    BindListener(SocketAddr, std::io::Error),
    #[error("local server stopped with an error: {0}")]
    Serve(std::io::Error),
}

#[derive(Parser)]
#[command(
    name = "claude-mcp-wrapper",
    about = "Expose the Claude Code MCP server over HTTP",
    version
)]
struct Cli {
    /// Port to listen on. Falls back to the PORT environment variable,
    /// then to 8947.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match cli.port {
        Some(port) => StatusConfig::new(port),
        None => StatusConfig::from_env().map_err(CliError::BadConfig)?,
    };

    run(config).await?;

    Ok(())
}

async fn run(config: StatusConfig) -> Result<(), CliError> {
    let mut claude_server = ClaudeMcpServer::start()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CliError::BindListener(addr, e))?;

    tracing::info!(
        "Claude Code MCP Server HTTP wrapper running on port {}",
        config.port
    );

    // Serves until a termination signal arrives, then drains the listener
    // before the claude child is stopped.
    start_server_http(listener, config, signal::shutdown_signal())
        .await
        .map_err(CliError::Serve)?;

    if !claude_server.is_running() {
        tracing::warn!("claude mcp serve already exited before shutdown");
    }

    claude_server.stop().await?;

    Ok(())
}
