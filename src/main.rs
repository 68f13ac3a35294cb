//! Users gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────────┐
//!                        │                   USERS GATEWAY                      │
//!                        │                                                      │
//!   Client Request       │  ┌──────────┐   ┌─────────┐   ┌──────────────┐       │
//!  ──────────────────────┼─▶│ listener │──▶│  http   │──▶│   routing    │       │
//!                        │  │ (1 of N) │   │ server  │   │   table      │       │
//!                        │  └──────────┘   └─────────┘   └──────┬───────┘       │
//!                        │                                  match │ no match    │
//!                        │                           ┌────────────┴──────┐      │
//!                        │                           ▼                   ▼      │
//!                        │                    ┌────────────┐   ┌──────────────┐ │
//!                        │                    │   store    │   │ round robin  │ │
//!                        │                    │ (shared)   │   │ + proxy      │─┼──▶ next listener
//!                        │                    └────────────┘   └──────────────┘ │
//!                        └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every listener shares one store, one worker pool and one HTTP client.

use std::path::PathBuf;

use clap::Parser;

use users_gateway::config::{resolve_config, ConfigOverrides};
use users_gateway::lifecycle::{bootstrap, signals, Shutdown};
use users_gateway::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "users-gateway")]
#[command(about = "In-memory users API served from a round-robin listener pool", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// First port of the listener pool.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Number of listeners (defaults to available parallelism).
    #[arg(short, long, env = "WORKERS")]
    workers: Option<usize>,

    /// Host to bind and to address workers by.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Answer unmatched requests with 404 instead of proxying them.
    #[arg(long)]
    no_proxy: bool,

    /// Log level (overridden by RUST_LOG).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_port: self.port,
            workers: self.workers,
            host: self.host.clone(),
            disable_proxy: self.no_proxy,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.overrides())?;

    logging::init(&config.observability.log_level);

    tracing::info!("users-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.listener.host,
        base_port = config.listener.base_port,
        workers = config.listener.workers,
        proxy_enabled = config.proxy.enabled,
        proxy_timeout_secs = config.timeouts.proxy_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let pool = bootstrap(&config, &shutdown).await?;
    for addr in pool.local_addrs() {
        tracing::info!(address = %addr, "Server running");
    }

    signals::trigger_on_signal(shutdown.clone());
    pool.wait().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
