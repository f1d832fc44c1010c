use super::component::ComponentState;
use super::country::CountryModel;
use super::field::{ErrorRef, FieldId};
use super::registry::FieldRegistry;
use crate::config::FormConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;

/// Describes one payment method form: its fields, their strategies, how the
/// state is shown and what payload it produces.
pub trait PaymentForm: Send + Sync + 'static {
    type FieldId: FieldId;
    type State: Clone + Debug + PartialEq + Send + Sync + 'static;
    type ViewState: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static;
    type PaymentMethod: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static;

    fn payment_method_type(&self) -> &'static str;

    fn create_default_state(&self) -> Self::State;

    fn create_registry(&self) -> Result<FieldRegistry<Self::FieldId, Self::State>>;

    /// Projects the domain state into what the view renders. Pure.
    fn project(&self, state: &Self::State) -> Self::ViewState;

    /// Maps a validated state to the payment method details. Pure.
    fn payment_method(&self, state: &Self::State, config: &FormConfig) -> Self::PaymentMethod;
}

/// Receives payloads that passed the submission gate. Owns networking,
/// action handling and result propagation.
#[async_trait]
pub trait SubmissionHandler<P>: Send + Sync {
    async fn submit(&self, state: ComponentState<P>) -> Result<()>;
}

pub type SubmissionHandlerBox<P> = Box<dyn SubmissionHandler<P>>;

/// Optional product analytics sink.
pub trait AnalyticsTracker: Send + Sync {
    fn track_validation_error(&self, payment_method: &str, field: &str, reason: ErrorRef);
}

pub type AnalyticsTrackerArc = Arc<dyn AnalyticsTracker>;

/// Reference data source for country pickers, resolved before a form is built.
pub trait CountryCatalog: Send + Sync {
    /// Countries with names in `language`, restricted to `allowed` ISO codes
    /// when given, sorted by name.
    fn localized_countries(&self, language: &str, allowed: Option<&[&str]>) -> Vec<CountryModel>;
}

/// Turns error references into text. Only the view layer calls this.
pub trait Localizer: Send + Sync {
    fn localize(&self, reason: ErrorRef) -> String;
}
