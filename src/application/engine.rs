use crate::application::store::DelegateStateManager;
use crate::config::FormConfig;
use crate::domain::component::{ComponentState, PaymentComponentData};
use crate::domain::field::ErrorRef;
use crate::domain::intent::Intent;
use crate::domain::ports::{AnalyticsTrackerArc, PaymentForm, SubmissionHandlerBox};
use crate::error::Result;
use std::any::Any;
use std::fmt::Debug;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<P> {
    /// The form was valid and the payload went to the submission handler.
    Submitted(ComponentState<P>),
    /// The form was invalid; every field now shows its error and no payload
    /// was produced.
    Rejected,
}

/// The engine behind one payment method form.
///
/// `FormEngine` owns the form's state store, re-projects the view state after
/// every dispatched intent, and gates submission on whole-form validity. An
/// engine serves exactly one form instance; build a new one for every form.
pub struct FormEngine<P: PaymentForm> {
    form: P,
    config: FormConfig,
    store: DelegateStateManager<P::FieldId, P::State>,
    view_state: watch::Sender<P::ViewState>,
    submission_handler: SubmissionHandlerBox<P::PaymentMethod>,
}

impl<P: PaymentForm> FormEngine<P> {
    /// Creates an engine with the form's default state.
    ///
    /// Fails when the form's registry does not cover every declared field.
    pub fn new(
        form: P,
        config: FormConfig,
        submission_handler: SubmissionHandlerBox<P::PaymentMethod>,
    ) -> Result<Self> {
        let registry = form.create_registry()?;
        let default_state = form.create_default_state();
        let (view_state, _) = watch::channel(form.project(&default_state));
        let store = DelegateStateManager::new(registry, default_state, config.validation_mode);
        debug!(
            payment_method = form.payment_method_type(),
            validation_mode = ?config.validation_mode,
            "form engine created"
        );

        Ok(Self {
            form,
            config,
            store,
            view_state,
            submission_handler,
        })
    }

    #[must_use]
    pub fn with_analytics(mut self, tracker: AnalyticsTrackerArc) -> Self {
        self.store
            .set_analytics(self.form.payment_method_type(), tracker);
        self
    }

    pub fn form(&self) -> &P {
        &self.form
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn store(&self) -> &DelegateStateManager<P::FieldId, P::State> {
        &self.store
    }

    pub fn state(&self) -> P::State {
        self.store.state()
    }

    pub fn view_state(&self) -> P::ViewState {
        self.view_state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<P::State> {
        self.store.subscribe()
    }

    pub fn subscribe_view_state(&self) -> watch::Receiver<P::ViewState> {
        self.view_state.subscribe()
    }

    pub fn dispatch(&mut self, intent: Intent<P::FieldId>) -> Result<()> {
        self.store.dispatch(intent)?;
        self.refresh_view_state();
        Ok(())
    }

    /// Value change from the view. `None` means the view has nothing to
    /// report and is ignored.
    pub fn on_field_value_changed<T>(&mut self, field: P::FieldId, value: Option<T>) -> Result<()>
    where
        T: Any + Debug + PartialEq + Send + Sync,
    {
        match value {
            Some(value) => self.dispatch(Intent::update_field(field, value)),
            None => Ok(()),
        }
    }

    pub fn on_field_focus_changed(&mut self, field: P::FieldId, has_focus: bool) -> Result<()> {
        self.dispatch(Intent::update_focus(field, has_focus))
    }

    pub fn highlight_all_errors(&mut self) -> Result<()> {
        self.dispatch(Intent::HighlightAllErrors)
    }

    /// Fields currently showing an error, in declaration order.
    pub fn shown_errors(&self) -> Vec<(P::FieldId, ErrorRef)> {
        self.store.shown_errors()
    }

    /// Whether the current state may be turned into a payload.
    pub fn can_submit(&self) -> bool {
        self.store.is_valid()
    }

    /// Submits the form.
    ///
    /// An invalid form highlights all of its errors and is not submitted. A
    /// valid form is mapped to a [`ComponentState`] and handed to the
    /// submission handler.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<P::PaymentMethod>> {
        let Some(component_state) = self.validated_component_state() else {
            warn!(
                payment_method = self.form.payment_method_type(),
                "submission refused, form is invalid"
            );
            self.highlight_all_errors()?;
            return Ok(SubmitOutcome::Rejected);
        };

        self.submission_handler
            .submit(component_state.clone())
            .await?;
        info!(
            payment_method = self.form.payment_method_type(),
            "payment submitted"
        );
        Ok(SubmitOutcome::Submitted(component_state))
    }

    fn validated_component_state(&self) -> Option<ComponentState<P::PaymentMethod>> {
        self.store.with_state(|state| {
            if !self.store.registry().is_valid(state) {
                return None;
            }
            Some(ComponentState {
                data: PaymentComponentData {
                    payment_method: self.form.payment_method(state, &self.config),
                    order: self.config.order.clone(),
                    amount: self.config.amount.clone(),
                },
                is_input_valid: true,
                is_ready: true,
            })
        })
    }

    fn refresh_view_state(&self) {
        let view_state = self.store.with_state(|state| self.form.project(state));
        self.view_state.send_if_modified(|current| {
            if *current == view_state {
                false
            } else {
                *current = view_state;
                true
            }
        });
    }
}
