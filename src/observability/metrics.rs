//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method, status
//! - `relay_request_duration_seconds` (histogram): end-to-end latency
//! - `relay_forwarded_bytes_total` (counter): file bytes sent to the processor
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished relay request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("relay_requests_total", &labels).increment(1);
    metrics::histogram!("relay_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of a file handed to the processor.
pub fn record_forwarded_bytes(bytes: usize) {
    metrics::counter!("relay_forwarded_bytes_total").increment(bytes as u64);
}
