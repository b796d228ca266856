// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the fake NEG provider.
//!
//! All metrics use the namespace prefix `negfake_`. Tests that drive a
//! controller against the fake can scrape these to assert how many calls the
//! controller made without wrapping the store.
//!
//! # Example
//!
//! ```rust
//! use negfake::metrics::{gather_metrics, record_operation};
//!
//! record_operation("get", true);
//! assert!(gather_metrics().unwrap().contains("negfake_operations_total"));
//! ```

use crate::constants::{METRICS_NAMESPACE, RESULT_ERROR, RESULT_SUCCESS};
use prometheus::{CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use std::sync::LazyLock;

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Store Metrics
// ============================================================================

/// Total number of store operations by operation and result
///
/// Labels:
/// - `operation`: Store method (`get`, `list`, `create`, `attach`, ...)
/// - `result`: Outcome (`success`, `error`)
pub static OPERATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_operations_total"),
        "Total number of store operations by operation and result",
    );
    let counter = CounterVec::new(opts, &["operation", "result"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of endpoints attached or detached
///
/// Labels:
/// - `operation`: `attach` or `detach`
pub static ENDPOINT_CHANGES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_endpoint_changes_total"),
        "Total number of endpoints attached or detached",
    );
    let counter = CounterVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Creates minus deletes, summed over every fake in the process
pub static NEGS_ACTIVE: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(
        format!("{METRICS_NAMESPACE}_negs_active"),
        "Network endpoint groups created minus deleted, across all fakes in the process",
    )
    .unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record the outcome of a store operation
///
/// # Arguments
/// * `operation` - Store method name
/// * `success` - Whether the call returned `Ok`
pub fn record_operation(operation: &str, success: bool) {
    let result = if success { RESULT_SUCCESS } else { RESULT_ERROR };
    OPERATIONS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
}

/// Record endpoints added to or removed from a group
///
/// # Arguments
/// * `operation` - `attach` or `detach`
/// * `count` - Number of endpoints that changed
pub fn record_endpoint_changes(operation: &str, count: usize) {
    #[allow(clippy::cast_precision_loss)]
    let amount = count as f64;
    ENDPOINT_CHANGES_TOTAL
        .with_label_values(&[operation])
        .inc_by(amount);
}

/// Record a network endpoint group creation
pub fn record_neg_created() {
    NEGS_ACTIVE.inc();
}

/// Record a network endpoint group deletion
pub fn record_neg_deleted() {
    NEGS_ACTIVE.dec();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    // Touch lazily registered metrics so they appear even before first use.
    LazyLock::force(&OPERATIONS_TOTAL);
    LazyLock::force(&ENDPOINT_CHANGES_TOTAL);
    LazyLock::force(&NEGS_ACTIVE);

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
        record_operation("metrics-test-get", true);

        let counter = OPERATIONS_TOTAL.with_label_values(&["metrics-test-get", "success"]);
        assert!(counter.get() > 0.0);
    }

    #[test]
    fn test_record_operation_error() {
        record_operation("metrics-test-delete", false);

        let counter = OPERATIONS_TOTAL.with_label_values(&["metrics-test-delete", "error"]);
        assert!(counter.get() > 0.0);
    }

    #[test]
    fn test_record_endpoint_changes() {
        let before = ENDPOINT_CHANGES_TOTAL
            .with_label_values(&["metrics-test-attach"])
            .get();
        record_endpoint_changes("metrics-test-attach", 3);
        let after = ENDPOINT_CHANGES_TOTAL
            .with_label_values(&["metrics-test-attach"])
            .get();
        assert!((after - before - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negs_active_help_describes_tally() {
        let text = gather_metrics().unwrap();
        assert!(text.contains(
            "# HELP negfake_negs_active Network endpoint groups created minus deleted, across all fakes in the process"
        ));
    }

    #[test]
    fn test_gather_metrics() {
        record_operation("gather-test", true);

        let result = gather_metrics();
        assert!(result.is_ok(), "Gathering metrics should succeed");

        let metrics_text = result.unwrap();
        assert!(
            metrics_text.contains("negfake_operations_total"),
            "Metrics should contain the operation counter"
        );
        assert!(
            metrics_text.contains("negfake_negs_active"),
            "Metrics should contain the active gauge"
        );
    }
}
