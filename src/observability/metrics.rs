//! Metrics collection and exposition.
//!
//! # Metrics
//! - `music_api_requests_total` (counter): requests by endpoint, status
//! - `music_api_request_duration_seconds` (histogram): latency by endpoint
//! - `music_api_upstream_errors_total` (counter): upstream failures by endpoint, kind
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "music_api_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("music_api_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error(endpoint: &'static str, kind: &'static str) {
    metrics::counter!(
        "music_api_upstream_errors_total",
        "endpoint" => endpoint,
        "kind" => kind
    )
    .increment(1);
}
