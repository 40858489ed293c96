//! Shared operation bookkeeping for resource implementations.

use crate::error::SecureKeyError;
use crate::observability::metrics;
use std::time::{Duration, Instant};
use tracing::Span;

/// Records metrics and span attributes for one remote operation
///
/// The span must declare `operation.success`, `operation.duration_ms` and
/// `error.message` (as `tracing::field::Empty`) for the attributes to stick.
pub(crate) struct OperationTracker {
    operation: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTracker {
    pub(crate) fn new(operation: &'static str, span: Span) -> Self {
        Self {
            operation,
            start: Instant::now(),
            span,
        }
    }

    pub(crate) fn record_success(&self) {
        let duration = self.start.elapsed();
        self.record_duration(duration);
        self.span.record("operation.success", true);
        metrics::record_operation(self.operation, duration.as_secs_f64());
    }

    pub(crate) fn record_error(&self, error: &SecureKeyError) {
        let duration = self.start.elapsed();
        self.record_duration(duration);
        self.span.record("operation.success", false);
        self.span.record("error.message", error.to_string());
        metrics::record_operation(self.operation, duration.as_secs_f64());
        metrics::increment_operation_errors(self.operation, error.kind());
    }

    #[allow(clippy::cast_possible_truncation, reason = "durations fit in u64 millis")]
    fn record_duration(&self, duration: Duration) {
        self.span
            .record("operation.duration_ms", duration.as_millis() as u64);
    }
}
