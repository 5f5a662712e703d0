//! secure-gate
//!
//! Hosts mounts guarded by a secure-origin policy.
//!
//! # Architecture Overview
//!
//! ```text
//!   plain listener ──▶ Transport::Plain ─┐
//!                                        ├─▶ mount route ─▶ secure_origin_middleware ─┬─▶ 200
//!   TLS listener   ──▶ Transport::Tls  ──┘                    (SecureOriginPolicy)    ├─▶ 301 https://…
//!                                                                                     └─▶ 403 message
//! ```

use std::path::PathBuf;

use clap::Parser;

use secure_gate::config::{load_config, GateConfig};
use secure_gate::lifecycle::signals::spawn_signal_handler;
use secure_gate::observability::{logging, metrics};
use secure_gate::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "secure-gate")]
#[command(about = "Redirects or rejects requests that did not arrive over HTTPS", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("secure-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        mounts = config.mounts.len(),
        "Configuration loaded"
    );
    if config.mounts.is_empty() {
        tracing::warn!("No mounts configured; every path will answer 404");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    HttpServer::new(config).serve(&shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
