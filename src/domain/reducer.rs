use super::field::{FieldFlags, FieldId};
use super::intent::Intent;
use super::registry::FieldRegistry;
use crate::config::ValidationMode;
use crate::error::{FormError, Result};

/// Computes the next form state from the current one and an intent.
///
/// Reduction never touches the input state: it works on a private copy and
/// returns it. The same state and intent always produce the same result.
pub struct Reducer<'a, F: FieldId, S> {
    registry: &'a FieldRegistry<F, S>,
    validation_mode: ValidationMode,
}

impl<'a, F, S> Reducer<'a, F, S>
where
    F: FieldId,
    S: Clone + 'static,
{
    pub fn new(registry: &'a FieldRegistry<F, S>, validation_mode: ValidationMode) -> Self {
        Self {
            registry,
            validation_mode,
        }
    }

    pub fn reduce(&self, state: &S, intent: &Intent<F>) -> Result<S> {
        match intent {
            Intent::UpdateField { field, value } => {
                let strategy = self.registry.erased(*field)?;
                let mut next = state.clone();
                strategy
                    .set_value(&mut next, value, self.validation_mode)
                    .map_err(|actual| FormError::FieldTypeMismatch {
                        field: field.to_string(),
                        expected: strategy.value_type_name(),
                        actual,
                    })?;
                self.revalidate_others(*field, &mut next);
                Ok(next)
            }
            Intent::UpdateFocus { field, has_focus } => {
                let strategy = self.registry.erased(*field)?;
                let flags = strategy.flags(state);
                let flags = if *has_focus {
                    // Keep the error for submission checks, hide it while editing.
                    FieldFlags {
                        is_focused: true,
                        show_error: false,
                        ..flags
                    }
                } else {
                    let error_message = strategy.validate_current(state).error();
                    FieldFlags {
                        error_message,
                        is_focused: false,
                        show_error: error_message.is_some(),
                    }
                };
                let mut next = state.clone();
                strategy.set_flags(&mut next, flags);
                Ok(next)
            }
            Intent::HighlightAllErrors => {
                let validations: Vec<_> = self.registry.validations(state).collect();
                let first_invalid = validations
                    .iter()
                    .find(|(_, validation)| !validation.is_valid())
                    .map(|(field, _)| *field);

                let mut next = state.clone();
                for ((field, validation), (_, strategy)) in
                    validations.into_iter().zip(self.registry.entries())
                {
                    let error_message = validation.error();
                    let is_focused = match first_invalid {
                        Some(first) => first == field,
                        None => strategy.flags(state).is_focused,
                    };
                    strategy.set_flags(
                        &mut next,
                        FieldFlags {
                            error_message,
                            is_focused,
                            show_error: error_message.is_some(),
                        },
                    );
                }
                Ok(next)
            }
        }
    }

    /// Validators may read other fields, so a value update can change the
    /// verdict of fields it does not touch. Every field carrying an error is
    /// rechecked; in eager mode every field is. A shown error stays shown only
    /// while it still applies.
    fn revalidate_others(&self, updated: F, state: &mut S) {
        for (field, strategy) in self.registry.entries() {
            let flags = strategy.flags(state);
            if field == updated
                || (self.validation_mode == ValidationMode::OnBlur && flags.error_message.is_none())
            {
                continue;
            }
            let error_message = strategy.validate_current(state).error();
            strategy.set_flags(
                state,
                FieldFlags {
                    error_message,
                    show_error: flags.show_error && error_message.is_some(),
                    ..flags
                },
            );
        }
    }
}
