//! Metrics collection and exposition.
//!
//! # Metrics
//! - `console_router_navigations_total` (counter): resolutions by outcome
//!   (`resolved`, `redirected`, `not_found`)
//! - `console_router_http_requests_total` (counter): requests by endpoint, status
//! - `console_router_http_request_duration_seconds` (histogram): latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a navigation outcome.
pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("console_router_navigations_total", "outcome" => outcome).increment(1);
}

/// Record a completed HTTP request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "console_router_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "console_router_http_request_duration_seconds",
        "endpoint" => endpoint
    )
    .record(start.elapsed().as_secs_f64());
}
