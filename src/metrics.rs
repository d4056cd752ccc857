//! Prometheus metrics for the users API.
//!
//! Counters track user mutations and errors by code. A latency histogram is
//! recorded per endpoint through [`LatencyTimer`].

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::ErrorCode;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Users created counter metric name.
pub const METRIC_USERS_CREATED: &str = "users_created_total";
/// Users deleted counter metric name.
pub const METRIC_USERS_DELETED: &str = "users_deleted_total";
/// Users updated counter metric name.
pub const METRIC_USERS_UPDATED: &str = "users_updated_total";
/// Error responses counter metric name.
pub const METRIC_USER_ERRORS: &str = "user_errors_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_USERS_CREATED, "Total number of users created");
    describe_counter!(METRIC_USERS_DELETED, "Total number of users deleted");
    describe_counter!(METRIC_USERS_UPDATED, "Total number of users updated");
    describe_counter!(
        METRIC_USER_ERRORS,
        "Total number of error responses, labelled by error code"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_prometheus() -> Result<PrometheusHandle, String> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| e.to_string())?;
    init_metrics();
    Ok(handle)
}

/// Increment users created counter.
pub fn inc_users_created() {
    counter!(METRIC_USERS_CREATED).increment(1);
}

/// Increment users deleted counter.
pub fn inc_users_deleted() {
    counter!(METRIC_USERS_DELETED).increment(1);
}

/// Increment users updated counter.
pub fn inc_users_updated() {
    counter!(METRIC_USERS_UPDATED).increment(1);
}

/// Increment the error counter for `code`.
pub fn inc_user_errors(code: ErrorCode) {
    let code: &'static str = code.into();
    counter!(METRIC_USER_ERRORS, "code" => code).increment(1);
}

/// RAII guard for timing a request.
/// Records latency for its endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(latency_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("test_endpoint");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
        // Timer will record on drop
    }

    #[test]
    fn counters_without_recorder_are_noops() {
        inc_users_created();
        inc_user_errors(ErrorCode::PathNotFound);
    }
}
