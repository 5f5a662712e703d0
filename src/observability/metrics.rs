//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_decisions_total` (counter): decisions by outcome and method
//! - `gate_trusted_header_total` (counter): passes vouched for by a proxy header

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::policy::HeaderKind;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one gate decision.
pub fn record_decision(outcome: &'static str, method: &str) {
    metrics::counter!(
        "gate_decisions_total",
        "outcome" => outcome,
        "method" => method.to_string()
    )
    .increment(1);
}

/// Count a pass granted on the strength of a trusted proxy header.
pub fn record_trusted_header(kind: HeaderKind) {
    metrics::counter!("gate_trusted_header_total", "header" => kind.header_name()).increment(1);
}
