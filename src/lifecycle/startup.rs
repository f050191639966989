//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the route table and view registry from validated config
//! - Start the metrics exporter
//! - Bind the listener and run the HTTP server until shutdown
//!
//! # Design Decisions
//! - Fail fast: an invalid route table refuses to start
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RouterConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::routing::TableError;

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid route table: {0}")]
    Routes(#[from] TableError),

    #[error("invalid bind address {address:?}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the service and run until `shutdown` fires.
pub async fn run(config: RouterConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let nav = config.navigation.build_router()?;
    tracing::info!(
        routes = nav.table().len(),
        app_title = %config.navigation.app_title,
        "Route table built"
    );
    for route in nav.table().routes() {
        tracing::debug!(path = %route.path, route_name = ?route.name, route_target = ?route.target, "Route");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let addr: SocketAddr = config
        .listener
        .bind_address
        .parse()
        .map_err(|source| StartupError::Address {
            address: config.listener.bind_address.clone(),
            source,
        })?;
    let tls = config.listener.tls.clone();
    let server = HttpServer::new(&config, nav);

    match tls {
        Some(tls) => {
            let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    Ok(())
}
