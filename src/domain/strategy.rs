use super::field::{FieldFlags, FieldState, Validation};
use super::intent::FieldValue;
use crate::config::ValidationMode;
use std::any::{Any, type_name};

/// Normalizes raw input for one field before it is stored.
pub trait FieldTransformer<T>: Send + Sync {
    fn transform(&self, value: T) -> T;
}

/// Computes the validity of one field value, with read-only access to the
/// rest of the form state.
pub trait FieldValidator<S, T>: Send + Sync {
    fn validate(&self, value: &T, state: &S) -> Validation;
}

/// Reads and writes the slot holding one field inside a form state.
pub trait StateAccessor<S, T>: Send + Sync {
    fn get<'a>(&self, state: &'a S) -> &'a FieldState<T>;

    /// Replaces the slot in `state`. Only called on a copy owned by the caller.
    fn set(&self, state: &mut S, field_state: FieldState<T>);
}

pub struct IdentityTransformer;

impl<T> FieldTransformer<T> for IdentityTransformer {
    fn transform(&self, value: T) -> T {
        value
    }
}

pub struct AlwaysValid;

impl<S, T> FieldValidator<S, T> for AlwaysValid {
    fn validate(&self, _value: &T, _state: &S) -> Validation {
        Validation::Valid
    }
}

/// Everything the engine needs to handle one field holding values of type `T`.
///
/// A new strategy has an identity transformer and accepts every value.
pub struct FieldStrategy<S, T> {
    accessor: Box<dyn StateAccessor<S, T>>,
    transformer: Box<dyn FieldTransformer<T>>,
    validator: Box<dyn FieldValidator<S, T>>,
}

impl<S, T> FieldStrategy<S, T> {
    pub fn new(accessor: impl StateAccessor<S, T> + 'static) -> Self {
        Self {
            accessor: Box::new(accessor),
            transformer: Box::new(IdentityTransformer),
            validator: Box::new(AlwaysValid),
        }
    }

    #[must_use]
    pub fn with_transformer(self, transformer: impl FieldTransformer<T> + 'static) -> Self {
        Self {
            transformer: Box::new(transformer),
            ..self
        }
    }

    #[must_use]
    pub fn with_validator(self, validator: impl FieldValidator<S, T> + 'static) -> Self {
        Self {
            validator: Box::new(validator),
            ..self
        }
    }

    pub fn transform(&self, value: T) -> T {
        self.transformer.transform(value)
    }

    pub fn validate(&self, value: &T, state: &S) -> Validation {
        self.validator.validate(value, state)
    }

    pub fn field_state<'a>(&self, state: &'a S) -> &'a FieldState<T> {
        self.accessor.get(state)
    }

    pub(crate) fn set_field_state(&self, state: &mut S, field_state: FieldState<T>) {
        self.accessor.set(state, field_state)
    }
}

/// Operations the registry and reducer run on a strategy without knowing its
/// value type.
pub(crate) trait ErasedFieldStrategy<S>: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn value_type_name(&self) -> &'static str;

    fn flags(&self, state: &S) -> FieldFlags;

    fn set_flags(&self, state: &mut S, flags: FieldFlags);

    fn validate_current(&self, state: &S) -> Validation;

    /// Transforms and stores `value`. Fails with the name of the offered type
    /// when it is not the field's value type.
    fn set_value(
        &self,
        state: &mut S,
        value: &FieldValue,
        mode: ValidationMode,
    ) -> Result<(), &'static str>;
}

impl<S, T> ErasedFieldStrategy<S> for FieldStrategy<S, T>
where
    S: 'static,
    T: Clone + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn flags(&self, state: &S) -> FieldFlags {
        self.field_state(state).flags()
    }

    fn set_flags(&self, state: &mut S, flags: FieldFlags) {
        let field_state = self.field_state(state).clone().with_flags(flags);
        self.set_field_state(state, field_state);
    }

    fn validate_current(&self, state: &S) -> Validation {
        self.validate(self.field_state(state).value(), state)
    }

    fn set_value(
        &self,
        state: &mut S,
        value: &FieldValue,
        mode: ValidationMode,
    ) -> Result<(), &'static str> {
        let raw = value
            .downcast_ref::<T>()
            .ok_or_else(|| value.type_name())?
            .clone();
        let transformed = self.transform(raw);
        let error_message = match mode {
            ValidationMode::OnBlur => None,
            ValidationMode::Eager => self.validate(&transformed, state).error(),
        };
        let field_state = self
            .field_state(state)
            .clone()
            .with_value(transformed)
            .with_error(error_message);
        self.set_field_state(state, field_state);
        Ok(())
    }
}
