use crate::domain::field::ErrorRef;
use crate::domain::ports::AnalyticsTracker;
use tracing::info;

/// Analytics sink that emits one `tracing` event per shown validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalyticsTracker;

impl TracingAnalyticsTracker {
    pub fn new() -> Self {
        Self
    }
}

impl AnalyticsTracker for TracingAnalyticsTracker {
    fn track_validation_error(&self, payment_method: &str, field: &str, reason: ErrorRef) {
        info!(
            target: "checkout_forms::analytics",
            payment_method,
            field,
            reason = reason.key(),
            "validation error shown"
        );
    }
}
