//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_proxy_requests_total` (counter): proxy calls by worker, outcome
//! - `gateway_proxy_duration_seconds` (histogram): proxy latency by worker
//!
//! # Design Decisions
//! - Labels are low-cardinality: route label, status code, worker address
//! - Exporter is optional; without it the macros record into a no-op recorder

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(route: &'static str, status: u16, start_time: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record one outbound proxy call and how it ended.
pub fn record_proxy(worker: &str, outcome: &'static str, start_time: Instant) {
    metrics::counter!(
        "gateway_proxy_requests_total",
        "worker" => worker.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gateway_proxy_duration_seconds", "worker" => worker.to_string())
        .record(start_time.elapsed().as_secs_f64());
}
