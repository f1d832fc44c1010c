use crate::application::engine::{FormEngine, SubmitOutcome};
use crate::domain::intent::Intent;
use crate::domain::ports::PaymentForm;
use crate::error::{FormError, Result};
use crate::forms::blik::{BlikFieldId, BlikForm};
use crate::forms::mbway::{MBWayFieldId, MBWayForm};
use crate::interfaces::csv::event_reader::{UiAction, UiEvent};
use strum::IntoEnumIterator;
use tracing::debug;

/// A form whose fields can be driven from plain text, as typed in a terminal
/// or recorded in a file.
pub trait TextInputForm: PaymentForm {
    /// Resolves a field by its name, ignoring case.
    fn field_by_name(&self, name: &str) -> Result<Self::FieldId> {
        <Self::FieldId as IntoEnumIterator>::iter()
            .find(|field| field.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Builds the typed value update for `field` from raw text.
    fn text_intent(&self, field: Self::FieldId, text: &str) -> Result<Intent<Self::FieldId>>;
}

impl TextInputForm for MBWayForm {
    fn text_intent(&self, field: MBWayFieldId, text: &str) -> Result<Intent<MBWayFieldId>> {
        match field {
            MBWayFieldId::CountryCode => {
                let country = self
                    .find_country(text)
                    .cloned()
                    .ok_or_else(|| FormError::InvalidEvent(format!("unsupported country: {text}")))?;
                Ok(Intent::update_field(field, Some(country)))
            }
            MBWayFieldId::PhoneNumber => Ok(Intent::update_field(field, text.to_string())),
        }
    }
}

impl TextInputForm for BlikForm {
    fn text_intent(&self, field: BlikFieldId, text: &str) -> Result<Intent<BlikFieldId>> {
        match field {
            BlikFieldId::BlikCode => Ok(Intent::update_field(field, text.to_string())),
        }
    }
}

/// Applies one UI event to `engine`. Returns the outcome for submit events.
pub async fn apply_event<P: TextInputForm>(
    engine: &mut FormEngine<P>,
    event: &UiEvent,
) -> Result<Option<SubmitOutcome<P::PaymentMethod>>> {
    debug!(action = ?event.action, field = ?event.field, "applying event");
    match event.action {
        UiAction::Change => {
            let form = engine.form();
            let field = form.field_by_name(event.field_name()?)?;
            let intent = form.text_intent(field, event.value.as_deref().unwrap_or_default())?;
            engine.dispatch(intent)?;
        }
        UiAction::Focus | UiAction::Blur => {
            let field = engine.form().field_by_name(event.field_name()?)?;
            engine.on_field_focus_changed(field, event.action == UiAction::Focus)?;
        }
        UiAction::Highlight => engine.highlight_all_errors()?,
        UiAction::Submit => return engine.submit().await.map(Some),
    }
    Ok(None)
}
