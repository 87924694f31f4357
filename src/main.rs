//! Music API façade (v1)
//!
//! A thin HTTP layer built with Tokio and Axum that relays search,
//! playback-URL and song-detail lookups to a NetEase Cloud Music API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                  MUSIC API                    │
//!   Browser request   │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ handlers │──▶│  upstream  │──┼──▶ Gateway
//!                     │  │ server │   │ + params │   │  client    │  │
//!   ◀─────────────────┼──│ + cors │◀──│  relay   │◀──│ (timeouts) │◀─┼───
//!                     │  └────────┘   └──────────┘   └────────────┘  │
//!                     │  config · lifecycle · observability          │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use music_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use music_api::observability::{logging, metrics};
use music_api::{HttpServer, NeteaseClient, Shutdown};

#[derive(Parser)]
#[command(name = "music-api")]
#[command(about = "HTTP façade for music search and playback lookups", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("music-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.request_timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics exporter");
            }
        }
    }

    let provider = Arc::new(NeteaseClient::new(&config.upstream)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, provider)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
