use serde::Serialize;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use strum::IntoEnumIterator;

/// Identifier of one form field.
///
/// Implemented for closed, fieldless enums deriving `strum::EnumIter`, so a
/// registry can enumerate every declared field and check that it handles all
/// of them. Iteration order is the declaration order, which is also the order
/// in which `HighlightAllErrors` looks for the field to focus.
pub trait FieldId:
    Copy + Eq + Hash + Debug + Display + IntoEnumIterator + Send + Sync + 'static
{
}

impl<F> FieldId for F where
    F: Copy + Eq + Hash + Debug + Display + IntoEnumIterator + Send + Sync + 'static
{
}

/// Opaque reference to a localizable error message.
///
/// The engine only carries the key; turning it into text is left to the view
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorRef(&'static str);

impl ErrorRef {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &'static str {
        self.0
    }
}

impl Display for ErrorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Outcome of validating one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(ErrorRef),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn error(&self) -> Option<ErrorRef> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(reason) => Some(*reason),
        }
    }
}

/// The value-independent part of a [`FieldState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFlags {
    pub error_message: Option<ErrorRef>,
    pub is_focused: bool,
    pub show_error: bool,
}

impl FieldFlags {
    /// Drops `show_error` when there is no error to show.
    pub fn normalized(self) -> Self {
        Self {
            show_error: self.show_error && self.error_message.is_some(),
            ..self
        }
    }
}

/// State of a single field.
///
/// Every modifier consumes the state and returns a new one; `show_error` is
/// never true without an `error_message`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<T> {
    value: T,
    flags: FieldFlags,
}

impl<T> FieldState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            flags: FieldFlags::default(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn error_message(&self) -> Option<ErrorRef> {
        self.flags.error_message
    }

    pub fn is_focused(&self) -> bool {
        self.flags.is_focused
    }

    pub fn show_error(&self) -> bool {
        self.flags.show_error
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[must_use]
    pub fn with_value(self, value: T) -> Self {
        Self { value, ..self }
    }

    #[must_use]
    pub fn with_flags(self, flags: FieldFlags) -> Self {
        Self {
            flags: flags.normalized(),
            ..self
        }
    }

    #[must_use]
    pub fn with_error(self, error_message: Option<ErrorRef>) -> Self {
        let flags = FieldFlags {
            error_message,
            ..self.flags
        };
        self.with_flags(flags)
    }

    #[must_use]
    pub fn with_focus(self, is_focused: bool) -> Self {
        let flags = FieldFlags {
            is_focused,
            ..self.flags
        };
        self.with_flags(flags)
    }

    #[must_use]
    pub fn with_show_error(self, show_error: bool) -> Self {
        let flags = FieldFlags {
            show_error,
            ..self.flags
        };
        self.with_flags(flags)
    }
}

impl<T: Default> Default for FieldState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: ErrorRef = ErrorRef::new("field.required");

    #[test]
    fn test_show_error_requires_error_message() {
        let state = FieldState::new("".to_string()).with_show_error(true);
        assert!(!state.show_error());

        let state = state.with_error(Some(REQUIRED)).with_show_error(true);
        assert!(state.show_error());
        assert_eq!(state.error_message(), Some(REQUIRED));
    }

    #[test]
    fn test_clearing_error_hides_it() {
        let state = FieldState::new(1u8)
            .with_error(Some(REQUIRED))
            .with_show_error(true)
            .with_error(None);
        assert!(!state.show_error());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_with_value_keeps_flags() {
        let state = FieldState::new("a")
            .with_focus(true)
            .with_error(Some(REQUIRED));
        let updated = state.clone().with_value("b");
        assert_eq!(*updated.value(), "b");
        assert_eq!(updated.flags(), state.flags());
    }

    #[test]
    fn test_validation_error() {
        assert_eq!(Validation::Valid.error(), None);
        assert_eq!(Validation::Invalid(REQUIRED).error(), Some(REQUIRED));
        assert!(!Validation::Invalid(REQUIRED).is_valid());
    }
}
