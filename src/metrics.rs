//! Prometheus metrics for the lab service.
//!
//! This module provides:
//! - Visit and error counters
//! - Per-endpoint request latency histogram
//! - `/calculate` duration histogram
//!
//! Metric names are part of the lab's dashboards and alert rules; changing
//! them breaks downstream Grafana exercises.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Total visits counter metric name.
pub const METRIC_VISITS: &str = "app_visits_total";
/// Total errors counter metric name.
pub const METRIC_ERRORS: &str = "app_errors_total";
/// `/calculate` duration histogram metric name.
pub const METRIC_CALC_DURATION: &str = "calculate_duration_seconds";
/// Per-endpoint request latency histogram metric name.
pub const METRIC_REQUEST_LATENCY: &str = "request_latency_seconds";

/// Install the Prometheus recorder as the global metrics backend.
///
/// Returns the handle used by the `/metrics` endpoint to render the text
/// exposition. Call this once at startup, before any metric is recorded.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_VISITS, "Total number of requests received");
    describe_counter!(METRIC_ERRORS, "Total number of request errors");
    describe_histogram!(
        METRIC_CALC_DURATION,
        "Execution time of /calculate in seconds"
    );
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "Request latency in seconds, labeled by endpoint"
    );

    debug!("Metrics initialized");
}

/// Increment the total visits counter.
pub fn inc_visits() {
    counter!(METRIC_VISITS).increment(1);
}

/// Increment the total errors counter.
pub fn inc_errors() {
    counter!(METRIC_ERRORS).increment(1);
}

/// Record the duration of a `/calculate` invocation.
pub fn record_calc_duration(start: Instant) {
    histogram!(METRIC_CALC_DURATION).record(start.elapsed().as_secs_f64());
}

/// Record request latency for the given endpoint.
pub fn record_request_latency(start: Instant, endpoint: &str) {
    histogram!(METRIC_REQUEST_LATENCY, "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_a_recorder_is_a_noop() {
        // The metrics macros fall back to a no-op recorder when none is
        // installed, so helpers must be safe to call from any context.
        inc_visits();
        inc_errors();
        record_calc_duration(Instant::now());
        record_request_latency(Instant::now(), "/health");
    }
}
