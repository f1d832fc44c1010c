use crate::domain::component::ComponentState;
use crate::domain::field::ErrorRef;
use crate::domain::ports::{AnalyticsTracker, SubmissionHandler};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;

/// Collects every submitted payload in memory.
///
/// Clones share the same buffer, so a test or the CLI can keep one clone and
/// hand the other to the engine.
#[derive(Debug, Clone)]
pub struct InMemorySubmissionHandler<P> {
    submissions: Arc<RwLock<Vec<ComponentState<P>>>>,
}

impl<P> Default for InMemorySubmissionHandler<P> {
    fn default() -> Self {
        Self {
            submissions: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<P: Clone> InMemorySubmissionHandler<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received so far, in submission order.
    pub async fn submissions(&self) -> Vec<ComponentState<P>> {
        self.submissions.read().await.clone()
    }

    /// Removes and returns the payloads received so far.
    pub async fn drain(&self) -> Vec<ComponentState<P>> {
        std::mem::take(&mut *self.submissions.write().await)
    }
}

#[async_trait]
impl<P: Send + Sync + 'static> SubmissionHandler<P> for InMemorySubmissionHandler<P> {
    async fn submit(&self, state: ComponentState<P>) -> Result<()> {
        self.submissions.write().await.push(state);
        Ok(())
    }
}

/// A validation error event as seen by an analytics sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedValidationError {
    pub payment_method: String,
    pub field: String,
    pub reason: ErrorRef,
}

/// Analytics sink that keeps every event, for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalyticsTracker {
    events: Arc<Mutex<Vec<TrackedValidationError>>>,
}

impl RecordingAnalyticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackedValidationError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnalyticsTracker for RecordingAnalyticsTracker {
    fn track_validation_error(&self, payment_method: &str, field: &str, reason: ErrorRef) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TrackedValidationError {
                payment_method: payment_method.to_string(),
                field: field.to_string(),
                reason,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::PaymentComponentData;

    fn component_state(code: &str) -> ComponentState<String> {
        ComponentState {
            data: PaymentComponentData {
                payment_method: code.to_string(),
                order: None,
                amount: None,
            },
            is_input_valid: true,
            is_ready: true,
        }
    }

    #[tokio::test]
    async fn test_submissions_are_shared_between_clones() {
        let handler = InMemorySubmissionHandler::new();
        let boxed: Box<dyn SubmissionHandler<String>> = Box::new(handler.clone());

        boxed.submit(component_state("a")).await.unwrap();
        boxed.submit(component_state("b")).await.unwrap();

        let submitted = handler.submissions().await;
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[1].data.payment_method, "b");
    }

    #[tokio::test]
    async fn test_drain_empties_buffer() {
        let handler = InMemorySubmissionHandler::new();
        handler.submit(component_state("a")).await.unwrap();

        assert_eq!(handler.drain().await.len(), 1);
        assert!(handler.submissions().await.is_empty());
    }

    #[test]
    fn test_recording_tracker_keeps_events() {
        let tracker = RecordingAnalyticsTracker::new();
        let reason = ErrorRef::new("some.error");
        tracker.track_validation_error("mbway", "PHONE_NUMBER", reason);

        assert_eq!(
            tracker.events(),
            vec![TrackedValidationError {
                payment_method: "mbway".to_string(),
                field: "PHONE_NUMBER".to_string(),
                reason,
            }]
        );
    }
}
