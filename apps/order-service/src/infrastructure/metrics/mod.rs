//! Prometheus Metrics Module
//!
//! Request counters and latencies, labelled by delivery adapter.
//! Rendered at `/metrics` on the HTTP listener.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

use crate::error::ErrorCode;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<Result<PrometheusHandle, String>> = OnceLock::new();

/// The Prometheus recorder could not be installed.
#[derive(Debug, Clone, Error)]
#[error("Failed to install Prometheus recorder: {0}")]
pub struct MetricsError(String);

/// Initialize the Prometheus metrics recorder.
///
/// Idempotent: later calls return the handle from the first call.
pub fn init_metrics() -> Result<PrometheusHandle, MetricsError> {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| e.to_string())?;
            register_metrics();
            Ok(handle)
        })
        .clone()
        .map_err(MetricsError)
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().and_then(|r| r.as_ref().ok()).cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "order_service_orders_created_total",
        "Total orders created, by adapter"
    );
    describe_counter!(
        "order_service_orders_listed_total",
        "Total list-orders requests served, by adapter"
    );
    describe_counter!(
        "order_service_request_errors_total",
        "Total failed requests, by adapter and error code"
    );
    describe_histogram!(
        "order_service_request_duration_seconds",
        "Request handling time, by adapter and operation"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Delivery adapter label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    /// REST over HTTP.
    Http,
    /// GraphQL.
    Graphql,
    /// gRPC.
    Grpc,
}

impl Adapter {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Graphql => "graphql",
            Self::Grpc => "grpc",
        }
    }
}

/// Record an order created through an adapter.
pub fn record_order_created(adapter: Adapter) {
    counter!(
        "order_service_orders_created_total",
        "adapter" => adapter.as_str()
    )
    .increment(1);
}

/// Record a list-orders request.
pub fn record_orders_listed(adapter: Adapter) {
    counter!(
        "order_service_orders_listed_total",
        "adapter" => adapter.as_str()
    )
    .increment(1);
}

/// Record a failed request.
pub fn record_request_error(adapter: Adapter, code: ErrorCode) {
    counter!(
        "order_service_request_errors_total",
        "adapter" => adapter.as_str(),
        "code" => code.reason()
    )
    .increment(1);
}

/// Record request handling time.
pub fn record_request_duration(adapter: Adapter, operation: &'static str, duration: Duration) {
    histogram!(
        "order_service_request_duration_seconds",
        "adapter" => adapter.as_str(),
        "operation" => operation
    )
    .record(duration.as_secs_f64());
}

// =============================================================================
// Tests
// =============================================================================
