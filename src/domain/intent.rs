use std::any::{Any, type_name};
use std::fmt::{self, Debug};
use std::sync::Arc;

trait ErasedValue: Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
    fn dyn_eq(&self, other: &dyn ErasedValue) -> bool;
}

impl<T> ErasedValue for T
where
    T: Any + Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn dyn_eq(&self, other: &dyn ErasedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// A field value of any type, as dispatched by the view layer.
///
/// The registry recovers the concrete type when the value reaches the field's
/// strategy.
#[derive(Clone)]
pub struct FieldValue(Arc<dyn ErasedValue>);

impl FieldValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Debug + PartialEq + Send + Sync,
    {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().as_any().downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.0.as_ref().type_name()
    }
}

impl Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.0.as_ref(), f)
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref().dyn_eq(other.0.as_ref())
    }
}

/// A request to change the state of a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent<F> {
    UpdateField { field: F, value: FieldValue },
    UpdateFocus { field: F, has_focus: bool },
    HighlightAllErrors,
}

impl<F> Intent<F> {
    pub fn update_field<T>(field: F, value: T) -> Self
    where
        T: Any + Debug + PartialEq + Send + Sync,
    {
        Intent::UpdateField {
            field,
            value: FieldValue::new(value),
        }
    }

    pub fn update_focus(field: F, has_focus: bool) -> Self {
        Intent::UpdateFocus { field, has_focus }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::UpdateField { .. } => "update_field",
            Intent::UpdateFocus { .. } => "update_focus",
            Intent::HighlightAllErrors => "highlight_all_errors",
        }
    }
}
