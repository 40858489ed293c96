//! # Metrics
//!
//! Prometheus metrics for secure key lifecycle operations.
//!
//! ## Metrics Exposed
//!
//! - `securekey_operations_total` - Total number of operations by `operation`
//! - `securekey_operation_errors_total` - Total number of failed operations by `operation` and `kind`
//! - `securekey_operation_duration_seconds` - Duration of remote operations by `operation`
//! - `securekey_exists_scanned_records` - Number of records scanned per existence check

use prometheus::{Encoder, Histogram, HistogramVec, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "securekey_operations_total",
            "Total number of secure key operations by operation",
        ),
        &["operation"],
    )
    .expect("Failed to create OPERATIONS_TOTAL metric - this should never happen")
});

static OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "securekey_operation_errors_total",
            "Total number of failed secure key operations by operation and error kind",
        ),
        &["operation", "kind"],
    )
    .expect("Failed to create OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "securekey_operation_duration_seconds",
            "Duration of secure key operations in seconds by operation",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["operation"],
    )
    .expect("Failed to create OPERATION_DURATION metric - this should never happen")
});

static EXISTS_SCANNED_RECORDS: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "securekey_exists_scanned_records",
            "Number of listing records scanned per existence check",
        )
        .buckets(vec![1.0, 10.0, 50.0, 100.0, 500.0, 1000.0]),
    )
    .expect("Failed to create EXISTS_SCANNED_RECORDS metric - this should never happen")
});

/// Register all metrics with the crate registry
///
/// # Errors
/// Returns an error if a metric is registered twice
pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(EXISTS_SCANNED_RECORDS.clone()))?;
    Ok(())
}

/// Render registered metrics in the Prometheus text exposition format
///
/// # Errors
/// Returns an error if encoding fails
pub fn gather_metrics() -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn record_operation(operation: &str, duration: f64) {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
    OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration);
}

pub fn increment_operation_errors(operation: &str, kind: &str) {
    OPERATION_ERRORS_TOTAL
        .with_label_values(&[operation, kind])
        .inc();
}

#[allow(clippy::cast_precision_loss, reason = "listing sizes are far below 2^52")]
pub fn observe_exists_scanned_records(count: usize) {
    EXISTS_SCANNED_RECORDS.observe(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation() {
        let before = OPERATIONS_TOTAL.with_label_values(&["test_record"]).get();
        record_operation("test_record", 0.2);
        let after = OPERATIONS_TOTAL.with_label_values(&["test_record"]).get();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_increment_operation_errors() {
        let before = OPERATION_ERRORS_TOTAL
            .with_label_values(&["test_errors", "remote_call"])
            .get();
        increment_operation_errors("test_errors", "remote_call");
        let after = OPERATION_ERRORS_TOTAL
            .with_label_values(&["test_errors", "remote_call"])
            .get();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_observe_exists_scanned_records() {
        let before = EXISTS_SCANNED_RECORDS.get_sample_count();
        observe_exists_scanned_records(3);
        // Existence checks in other tests observe the same histogram
        assert!(EXISTS_SCANNED_RECORDS.get_sample_count() > before);
    }

    #[test]
    fn test_register_and_gather() {
        // Registration may already have happened in another test thread
        let _ = register_metrics();
        record_operation("test_gather", 0.01);
        let text = gather_metrics().unwrap();
        assert!(text.contains("securekey_operations_total"));
    }
}
