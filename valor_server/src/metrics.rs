//! Prometheus metrics for lookup traffic.

use std::net::SocketAddr;

use metrics::{counter, gauge};

/// Install the Prometheus exporter on `0.0.0.0:<port>`.
pub fn init_metrics(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!("Prometheus exporter listening on {}", addr),
        Err(e) => tracing::warn!("Failed to install Prometheus exporter: {}", e),
    }
}

/// Record a request to one of the lookup endpoints.
pub fn request_received(endpoint: &'static str) {
    counter!("valor_requests_total", "endpoint" => endpoint).increment(1);
}

/// Record a lookup that ended in a client-visible error.
pub fn lookup_failed(kind: &'static str) {
    counter!("valor_lookup_failures_total", "kind" => kind).increment(1);
}

/// Record a successful valuation.
pub fn valuation_computed(tipo: &'static str) {
    counter!("valor_valuations_total", "tipo" => tipo).increment(1);
}

/// Set the number of loaded district rows.
pub fn dataset_rows(count: usize) {
    gauge!("valor_dataset_rows").set(count as f64);
}
