// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the tfcrd provider.
//!
//! All metrics carry the namespace prefix `tfcrd_`. The registry lives for the
//! process; `tfcrd --metrics <command>` prints it to stderr once the command
//! finishes, and an embedding host can serve [`gather_metrics`] itself.
//!
//! # Metrics Categories
//!
//! - **Lifecycle Metrics** - Track Create/Read/Update/Delete calls and their outcomes
//! - **Manifest Metrics** - Track the size of rendered manifests
//! - **Error Metrics** - Track error conditions and types
//!
//! # Example
//!
//! ```rust,no_run
//! use tfcrd::metrics::{gather_metrics, record_operation_success};
//!
//! record_operation_success("ApmServer", "create", std::time::Duration::from_millis(2));
//! println!("{}", gather_metrics().unwrap());
//! ```

use crate::constants::METRICS_NAMESPACE;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Operation Name Constants
// ============================================================================

pub const OPERATION_CREATE: &str = "create";
pub const OPERATION_READ: &str = "read";
pub const OPERATION_UPDATE: &str = "update";
pub const OPERATION_DELETE: &str = "delete";
pub const OPERATION_RENDER: &str = "render";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Lifecycle Metrics
// ============================================================================

/// Total number of lifecycle operations by resource type, operation and status
///
/// Labels:
/// - `resource_type`: Kind of resource (e.g., `ApmServer`)
/// - `operation`: `create`, `read`, `update`, `delete`, `render`
/// - `status`: Outcome (`success`, `error`)
pub static OPERATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_operations_total"),
        "Total number of lifecycle operations by resource type, operation and status",
    );
    let counter = CounterVec::new(opts, &["resource_type", "operation", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of lifecycle operations in seconds
///
/// Labels:
/// - `resource_type`: Kind of resource
/// - `operation`: Lifecycle operation
pub static OPERATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_operation_duration_seconds"),
        "Duration of lifecycle operations in seconds by resource type and operation",
    )
    .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]);
    let histogram = HistogramVec::new(opts, &["resource_type", "operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Manifest Metrics
// ============================================================================

/// Size of rendered manifests in bytes
///
/// Labels:
/// - `resource_type`: Kind of resource
pub static MANIFEST_SIZE_BYTES: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_manifest_size_bytes"),
        "Size of rendered YAML manifests in bytes by resource type",
    )
    .buckets(vec![256.0, 1024.0, 4096.0, 16384.0, 65536.0, 262_144.0]);
    let histogram = HistogramVec::new(opts, &["resource_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Error Metrics
// ============================================================================

/// Total number of errors by resource type and error category
///
/// Labels:
/// - `resource_type`: Kind of resource
/// - `error_type`: Category of error (`convert_error`, `decode_error`, `yaml_error`, `model_error`)
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of errors by resource type and error category",
    );
    let counter = CounterVec::new(opts, &["resource_type", "error_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a successful lifecycle operation
///
/// # Arguments
/// * `resource_type` - The kind of resource (e.g., `ApmServer`)
/// * `operation` - The lifecycle operation
/// * `duration` - Duration of the operation
pub fn record_operation_success(resource_type: &str, operation: &str, duration: Duration) {
    OPERATIONS_TOTAL
        .with_label_values(&[resource_type, operation, "success"])
        .inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[resource_type, operation])
        .observe(duration.as_secs_f64());
}

/// Record a failed lifecycle operation
///
/// # Arguments
/// * `resource_type` - The kind of resource
/// * `operation` - The lifecycle operation
/// * `duration` - Duration of the operation before failure
pub fn record_operation_error(resource_type: &str, operation: &str, duration: Duration) {
    OPERATIONS_TOTAL
        .with_label_values(&[resource_type, operation, "error"])
        .inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[resource_type, operation])
        .observe(duration.as_secs_f64());
}

/// Record the size of a rendered manifest
pub fn record_manifest_size(resource_type: &str, bytes: usize) {
    #[allow(clippy::cast_precision_loss)]
    let bytes = bytes as f64;
    MANIFEST_SIZE_BYTES
        .with_label_values(&[resource_type])
        .observe(bytes);
}

/// Record an error
///
/// # Arguments
/// * `resource_type` - The kind of resource where error occurred
/// * `error_type` - Category of error (e.g., `yaml_error`)
pub fn record_error(resource_type: &str, error_type: &str) {
    ERRORS_TOTAL
        .with_label_values(&[resource_type, error_type])
        .inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation_success() {
        let resource_type = "TestResource";

        record_operation_success(resource_type, OPERATION_CREATE, Duration::from_millis(3));

        let counter =
            OPERATIONS_TOTAL.with_label_values(&[resource_type, OPERATION_CREATE, "success"]);
        assert!(counter.get() > 0.0);

        let histogram =
            OPERATION_DURATION_SECONDS.with_label_values(&[resource_type, OPERATION_CREATE]);
        assert!(histogram.get_sample_count() > 0);
    }

    #[test]
    fn test_record_operation_error() {
        let resource_type = "TestResourceError";

        record_operation_error(resource_type, OPERATION_UPDATE, Duration::from_millis(1));

        let counter =
            OPERATIONS_TOTAL.with_label_values(&[resource_type, OPERATION_UPDATE, "error"]);
        assert!(counter.get() > 0.0);
    }

    #[test]
    fn test_record_error_and_manifest_size() {
        record_error("TestResourceSize", "yaml_error");
        record_manifest_size("TestResourceSize", 2048);

        let errors = ERRORS_TOTAL.with_label_values(&["TestResourceSize", "yaml_error"]);
        assert!(errors.get() > 0.0);

        let sizes = MANIFEST_SIZE_BYTES.with_label_values(&["TestResourceSize"]);
        assert!(sizes.get_sample_count() > 0);
    }

    #[test]
    fn test_gather_metrics() {
        record_operation_success("TestResourceGather", OPERATION_READ, Duration::from_millis(1));

        let output = gather_metrics().unwrap();
        assert!(output.contains("tfcrd_operations_total"));
    }
}
