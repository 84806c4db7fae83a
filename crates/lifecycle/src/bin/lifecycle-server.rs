//! Lifecycle service binary.
//!
//! Standalone HTTP service that applies `/lifecycle` comment commands to
//! GitHub issues and pull requests.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lifecycle::{server, Config, GitHubLabelClient, LabelClient};

/// Comment-driven lifecycle label manager.
#[derive(Parser)]
#[command(name = "lifecycle-server")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides `LIFECYCLE_PORT`)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("lifecycle=info".parse()?))
        .init();

    info!("Starting lifecycle service...");

    let mut config = Config::default();
    if let Some(port) = cli.port {
        config.port = port;
    }

    if config.webhook_secret.is_none() {
        warn!("No GITHUB_WEBHOOK_SECRET configured - webhook signatures will not be verified");
    }

    let label_client: Option<Arc<dyn LabelClient>> = match &config.github_token {
        Some(token) => {
            let client =
                GitHubLabelClient::new(token, &config.github_api_url, config.request_timeout)
                    .context("Failed to create GitHub client")?;
            info!(api_url = %config.github_api_url, "GitHub label client configured");
            let client: Arc<dyn LabelClient> = Arc::new(client);
            Some(client)
        }
        None => {
            warn!("No GITHUB_TOKEN configured - webhooks will be rejected until one is set");
            None
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    let state = server::AppState {
        config,
        label_client,
    };

    server::run_server(state, listener).await
}
