//! Dashboard navigation router service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / client
//!     ─────────────────▶ http server ──▶ api handlers ─┐
//!                        (request id,                   ├──▶ routing::Router
//!                         trace, limits) ──▶ shell ─────┘      │
//!                                                              ▼
//!                                         RouteTable (immutable, built once)
//!                                                              │
//!                                                              ▼
//!                                                        ViewRegistry
//! ```

use std::path::PathBuf;

use clap::Parser;

use console_router::config::loader::load_config;
use console_router::lifecycle::{signals, startup};
use console_router::observability::logging;
use console_router::{RouterConfig, Shutdown};

#[derive(Parser)]
#[command(name = "console-router")]
#[command(about = "Navigation router for the admin dashboard", version)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "CONSOLE_ROUTER_CONFIG")]
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
        None => RouterConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!("console-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
