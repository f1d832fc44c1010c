use super::field::{FieldId, FieldState, Validation};
use super::strategy::{ErasedFieldStrategy, FieldStrategy};
use crate::error::{FormError, Result};
use std::any::type_name;
use std::collections::HashMap;

/// Maps every field of a form to its strategy.
///
/// The registry is built once per form instance and is total over the field
/// enum: [`FieldRegistryBuilder::build`] refuses to produce a registry with a
/// missing or duplicated field. Strategies are stored in declaration order
/// and looked up through an index, so both whole-form passes and single-field
/// lookups stay cheap.
pub struct FieldRegistry<F: FieldId, S> {
    strategies: Vec<(F, Box<dyn ErasedFieldStrategy<S>>)>,
    index: HashMap<F, usize>,
}

pub struct FieldRegistryBuilder<F: FieldId, S> {
    entries: Vec<(F, Box<dyn ErasedFieldStrategy<S>>)>,
}

impl<F: FieldId, S: 'static> Default for FieldRegistryBuilder<F, S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: FieldId, S: 'static> FieldRegistryBuilder<F, S> {
    #[must_use]
    pub fn register<T>(mut self, field: F, strategy: FieldStrategy<S, T>) -> Self
    where
        T: Clone + 'static,
    {
        self.entries.push((field, Box::new(strategy)));
        self
    }

    pub fn build(self) -> Result<FieldRegistry<F, S>> {
        let mut by_field: HashMap<F, Box<dyn ErasedFieldStrategy<S>>> = HashMap::new();
        for (field, strategy) in self.entries {
            if by_field.insert(field, strategy).is_some() {
                return Err(FormError::DuplicateStrategy {
                    field: field.to_string(),
                });
            }
        }

        let mut strategies = Vec::with_capacity(by_field.len());
        let mut index = HashMap::with_capacity(by_field.len());
        for field in F::iter() {
            let strategy = by_field
                .remove(&field)
                .ok_or_else(|| FormError::MissingStrategy {
                    field: field.to_string(),
                })?;
            index.insert(field, strategies.len());
            strategies.push((field, strategy));
        }

        Ok(FieldRegistry { strategies, index })
    }
}

impl<F: FieldId, S: 'static> FieldRegistry<F, S> {
    pub fn builder() -> FieldRegistryBuilder<F, S> {
        FieldRegistryBuilder::default()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.strategies.iter().map(|(field, _)| *field)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (F, &dyn ErasedFieldStrategy<S>)> {
        self.strategies
            .iter()
            .map(|(field, strategy)| (*field, strategy.as_ref()))
    }

    pub(crate) fn erased(&self, field: F) -> Result<&dyn ErasedFieldStrategy<S>> {
        self.index
            .get(&field)
            .and_then(|position| self.strategies.get(*position))
            .map(|(_, strategy)| strategy.as_ref())
            .ok_or_else(|| FormError::MissingStrategy {
                field: field.to_string(),
            })
    }

    /// Recovers the typed strategy of `field`.
    ///
    /// Asking for a value type other than the one the field was registered
    /// with is a programming error and fails with
    /// [`FormError::FieldTypeMismatch`].
    pub fn strategy<T: 'static>(&self, field: F) -> Result<&FieldStrategy<S, T>> {
        let erased = self.erased(field)?;
        erased
            .as_any()
            .downcast_ref::<FieldStrategy<S, T>>()
            .ok_or_else(|| FormError::FieldTypeMismatch {
                field: field.to_string(),
                expected: type_name::<T>(),
                actual: erased.value_type_name(),
            })
    }

    pub fn get_field_state<'a, T: 'static>(
        &self,
        state: &'a S,
        field: F,
    ) -> Result<&'a FieldState<T>> {
        Ok(self.strategy::<T>(field)?.field_state(state))
    }

    /// Returns a copy of `state` with the slot of `field` replaced.
    pub fn update_field_state<T: 'static>(
        &self,
        state: &S,
        field: F,
        field_state: FieldState<T>,
    ) -> Result<S>
    where
        S: Clone,
    {
        let strategy = self.strategy::<T>(field)?;
        let mut next = state.clone();
        strategy.set_field_state(&mut next, field_state);
        Ok(next)
    }

    pub fn transform<T: 'static>(&self, field: F, value: T) -> Result<T> {
        Ok(self.strategy::<T>(field)?.transform(value))
    }

    /// Validates a candidate value for `field` against the current state.
    pub fn validate<T: 'static>(&self, state: &S, field: F, value: &T) -> Result<Validation> {
        Ok(self.strategy::<T>(field)?.validate(value, state))
    }

    /// Validates the value currently stored for `field`.
    pub fn validate_field(&self, state: &S, field: F) -> Result<Validation> {
        Ok(self.erased(field)?.validate_current(state))
    }

    /// Per-field verdicts for the stored values, in declaration order.
    pub fn validations<'a>(&'a self, state: &'a S) -> impl Iterator<Item = (F, Validation)> + 'a {
        self.entries()
            .map(move |(field, strategy)| (field, strategy.validate_current(state)))
    }

    /// Whole-form validity: every field is valid.
    pub fn is_valid(&self, state: &S) -> bool {
        self.validations(state)
            .all(|(_, validation)| validation.is_valid())
    }
}
