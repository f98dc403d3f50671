//! Client metrics for observability.
//!
//! Provides Prometheus-compatible metrics for monitoring API usage and the
//! session/fetch layers.
//!
//! # Metrics
//!
//! - `stayfolio_client_requests_total` - Counter of requests by method and outcome
//! - `stayfolio_client_request_duration_seconds` - Histogram of request latencies
//! - `stayfolio_client_session_invalidations_total` - Counter of sessions cleared after a 401
//! - `stayfolio_client_stale_results_total` - Counter of fetch results discarded as stale
//!
//! # Usage
//!
//! Metrics are recorded automatically if a metrics recorder is installed. Use
//! any `metrics`-compatible backend like `metrics-exporter-prometheus`.
//! Without a recorder every call is a no-op.

use std::time::Instant;

use metrics::{counter, histogram};

/// Metric name for total requests.
pub const REQUESTS_TOTAL: &str = "stayfolio_client_requests_total";

/// Metric name for request duration histogram.
pub const REQUEST_DURATION_SECONDS: &str = "stayfolio_client_request_duration_seconds";

/// Metric name for session invalidations.
pub const SESSION_INVALIDATIONS_TOTAL: &str = "stayfolio_client_session_invalidations_total";

/// Metric name for discarded fetch results.
pub const STALE_RESULTS_TOTAL: &str = "stayfolio_client_stale_results_total";

/// Request outcome for metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx response
    Success,
    /// Non-2xx response
    Rejected,
    /// No response
    Error,
    /// Future dropped before completion
    Cancelled,
}

impl Outcome {
    /// Get the outcome as a string for metrics labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Why a fetch result was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// A newer request was issued on the same slot
    Superseded,
    /// The controller was torn down
    Cancelled,
}

impl StaleReason {
    /// Get the reason as a string for metrics labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superseded => "superseded",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Record a request completion.
pub fn record_request(method: &str, outcome: Outcome, duration_seconds: f64) {
    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    histogram!(
        REQUEST_DURATION_SECONDS,
        "method" => method.to_string()
    )
    .record(duration_seconds);
}

/// Record a session cleared after the server rejected it.
pub fn record_session_invalidation() {
    counter!(SESSION_INVALIDATIONS_TOTAL).increment(1);
}

/// Record a fetch result that was not applied.
pub fn record_stale_result(reason: StaleReason) {
    counter!(STALE_RESULTS_TOTAL, "reason" => reason.as_str()).increment(1);
}

/// Timer guard for automatically recording request duration.
///
/// Records the request as cancelled when dropped without an explicit outcome,
/// which happens when the request future is dropped mid-flight.
#[must_use]
pub struct RequestTimer {
    method: String,
    start: Instant,
    recorded: bool,
}

impl RequestTimer {
    /// Start a new request timer.
    pub fn start(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Record a 2xx response and return the duration.
    pub fn success(self) -> std::time::Duration {
        self.finish(Outcome::Success)
    }

    /// Record a non-2xx response and return the duration.
    pub fn rejected(self) -> std::time::Duration {
        self.finish(Outcome::Rejected)
    }

    /// Record a transport failure and return the duration.
    pub fn error(self) -> std::time::Duration {
        self.finish(Outcome::Error)
    }

    fn finish(mut self, outcome: Outcome) -> std::time::Duration {
        let duration = self.start.elapsed();
        record_request(&self.method, outcome, duration.as_secs_f64());
        self.recorded = true;
        duration
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        if !self.recorded {
            let duration = self.start.elapsed();
            record_request(&self.method, Outcome::Cancelled, duration.as_secs_f64());
        }
    }
}

/// Describe all metrics for registration with a recorder.
///
/// Call this during application startup to register metric descriptions.
pub fn describe_metrics() {
    use metrics::{describe_counter, describe_histogram, Unit};

    describe_counter!(
        REQUESTS_TOTAL,
        Unit::Count,
        "Total number of HTTP requests made to the Stayfolio API"
    );

    describe_histogram!(
        REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "Duration of HTTP requests in seconds"
    );

    describe_counter!(
        SESSION_INVALIDATIONS_TOTAL,
        Unit::Count,
        "Total number of sessions cleared after a 401 response"
    );

    describe_counter!(
        STALE_RESULTS_TOTAL,
        Unit::Count,
        "Total number of fetch results discarded because they were superseded or cancelled"
    );
}
