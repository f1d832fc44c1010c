use crate::error::{FormError, Result};
use serde::Deserialize;
use std::io::Read;

/// What the shopper did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiAction {
    Change,
    Focus,
    Blur,
    Highlight,
    Submit,
}

/// One row of a recorded interaction: `action,field,value`.
///
/// `field` is required for change, focus and blur. `value` only matters for
/// change; a missing value means the input was emptied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UiEvent {
    pub action: UiAction,
    pub field: Option<String>,
    pub value: Option<String>,
}

impl UiEvent {
    pub fn field_name(&self) -> Result<&str> {
        self.field
            .as_deref()
            .ok_or_else(|| FormError::InvalidEvent(format!("{:?} event without a field", self.action)))
    }
}

/// Reads UI events from a CSV source with an `action,field,value` header.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes events, one result per row.
    pub fn events(self) -> impl Iterator<Item = Result<UiEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(FormError::from))
    }
}
