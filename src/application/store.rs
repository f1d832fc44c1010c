use crate::config::ValidationMode;
use crate::domain::field::{ErrorRef, FieldId};
use crate::domain::intent::Intent;
use crate::domain::ports::AnalyticsTrackerArc;
use crate::domain::reducer::Reducer;
use crate::domain::registry::FieldRegistry;
use crate::error::Result;
use tokio::sync::watch;
use tracing::{error, trace};

/// Owns the current state of one form instance.
///
/// The state lives in a `watch` channel: observers always see the latest
/// value and may skip intermediate ones, and a slow observer never holds up
/// dispatch. Only the owner of the manager can dispatch, since it needs
/// `&mut self`.
pub struct DelegateStateManager<F: FieldId, S> {
    registry: FieldRegistry<F, S>,
    validation_mode: ValidationMode,
    state: watch::Sender<S>,
    analytics: Option<(&'static str, AnalyticsTrackerArc)>,
}

impl<F, S> DelegateStateManager<F, S>
where
    F: FieldId,
    S: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(registry: FieldRegistry<F, S>, default_state: S, validation_mode: ValidationMode) -> Self {
        let (state, _) = watch::channel(default_state);
        Self {
            registry,
            validation_mode,
            state,
            analytics: None,
        }
    }

    /// Reports every field that starts showing an error to `tracker`.
    pub fn set_analytics(&mut self, payment_method: &'static str, tracker: AnalyticsTrackerArc) {
        self.analytics = Some((payment_method, tracker));
    }

    pub fn registry(&self) -> &FieldRegistry<F, S> {
        &self.registry
    }

    /// A copy of the current state.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// Whole-form validity, recomputed from the stored values.
    pub fn is_valid(&self) -> bool {
        self.with_state(|state| self.registry.is_valid(state))
    }

    /// Fields currently showing an error, in declaration order.
    pub fn shown_errors(&self) -> Vec<(F, ErrorRef)> {
        self.with_state(|state| shown_errors(&self.registry, state))
    }

    /// Reduces `intent` into a new state and publishes it.
    ///
    /// A failed reduction leaves the current state untouched.
    pub fn dispatch(&mut self, intent: Intent<F>) -> Result<()> {
        trace!(intent = intent.name(), "dispatching intent");
        let (next, newly_shown) = {
            let current = self.state.borrow();
            let next = Reducer::new(&self.registry, self.validation_mode)
                .reduce(&*current, &intent)
                .inspect_err(|e| error!(intent = ?intent, error = %e, "failed to reduce intent"))?;
            let before = shown_errors(&self.registry, &*current);
            let newly_shown: Vec<_> = shown_errors(&self.registry, &next)
                .into_iter()
                .filter(|shown| !before.contains(shown))
                .collect();
            (next, newly_shown)
        };

        let changed = self.state.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next;
                true
            }
        });
        trace!(changed, "state reduced");

        if let Some((payment_method, tracker)) = &self.analytics {
            for (field, reason) in newly_shown {
                tracker.track_validation_error(payment_method, &field.to_string(), reason);
            }
        }
        Ok(())
    }
}

fn shown_errors<F: FieldId, S: 'static>(registry: &FieldRegistry<F, S>, state: &S) -> Vec<(F, ErrorRef)> {
    registry
        .entries()
        .filter_map(|(field, strategy)| {
            let flags = strategy.flags(state);
            flags
                .error_message
                .filter(|_| flags.show_error)
                .map(|reason| (field, reason))
        })
        .collect()
}
