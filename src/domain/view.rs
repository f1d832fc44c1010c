use super::field::{ErrorRef, FieldState};
use serde::Serialize;

/// What the view shows for one field.
///
/// `error_message` is only set while the field is asked to show its error, so
/// the view never has to look at validity itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFieldState<T> {
    pub value: T,
    pub error_message: Option<ErrorRef>,
    pub is_focused: bool,
}

impl<T: Clone> From<&FieldState<T>> for ViewFieldState<T> {
    fn from(field_state: &FieldState<T>) -> Self {
        Self {
            value: field_state.value().clone(),
            error_message: field_state
                .error_message()
                .filter(|_| field_state.show_error()),
            is_focused: field_state.is_focused(),
        }
    }
}
