use crate::config::FormConfig;
use crate::domain::field::{ErrorRef, FieldState, Validation};
use crate::domain::ports::PaymentForm;
use crate::domain::registry::FieldRegistry;
use crate::domain::strategy::{FieldStrategy, FieldTransformer, FieldValidator, StateAccessor};
use crate::domain::view::ViewFieldState;
use crate::error::Result;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

pub const PAYMENT_METHOD_TYPE: &str = "blik";

pub const BLIK_CODE_INVALID: ErrorRef = ErrorRef::new("checkout_blik_code_invalid");

const BLIK_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BlikFieldId {
    BlikCode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlikDelegateState {
    pub blik_code: FieldState<String>,
}

struct BlikCodeAccessor;

impl StateAccessor<BlikDelegateState, String> for BlikCodeAccessor {
    fn get<'a>(&self, state: &'a BlikDelegateState) -> &'a FieldState<String> {
        &state.blik_code
    }

    fn set(&self, state: &mut BlikDelegateState, field_state: FieldState<String>) {
        state.blik_code = field_state;
    }
}

/// Codes are often pasted as `123 456`.
pub struct BlikCodeTransformer;

impl FieldTransformer<String> for BlikCodeTransformer {
    fn transform(&self, value: String) -> String {
        value.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

pub struct BlikCodeValidator;

impl FieldValidator<BlikDelegateState, String> for BlikCodeValidator {
    fn validate(&self, value: &String, _state: &BlikDelegateState) -> Validation {
        if value.len() == BLIK_CODE_LENGTH && value.chars().all(|c| c.is_ascii_digit()) {
            Validation::Valid
        } else {
            Validation::Invalid(BLIK_CODE_INVALID)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlikViewState {
    pub blik_code_field_state: ViewFieldState<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlikPaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_attempt_id: Option<String>,
    pub blik_code: String,
}

/// Single six-digit code generated by the shopper's banking app.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlikForm;

impl BlikForm {
    pub fn new() -> Self {
        Self
    }
}

impl PaymentForm for BlikForm {
    type FieldId = BlikFieldId;
    type State = BlikDelegateState;
    type ViewState = BlikViewState;
    type PaymentMethod = BlikPaymentMethod;

    fn payment_method_type(&self) -> &'static str {
        PAYMENT_METHOD_TYPE
    }

    fn create_default_state(&self) -> BlikDelegateState {
        BlikDelegateState::default()
    }

    fn create_registry(&self) -> Result<FieldRegistry<BlikFieldId, BlikDelegateState>> {
        FieldRegistry::builder()
            .register(
                BlikFieldId::BlikCode,
                FieldStrategy::new(BlikCodeAccessor)
                    .with_transformer(BlikCodeTransformer)
                    .with_validator(BlikCodeValidator),
            )
            .build()
    }

    fn project(&self, state: &BlikDelegateState) -> BlikViewState {
        BlikViewState {
            blik_code_field_state: ViewFieldState::from(&state.blik_code),
        }
    }

    fn payment_method(&self, state: &BlikDelegateState, config: &FormConfig) -> BlikPaymentMethod {
        BlikPaymentMethod {
            kind: PAYMENT_METHOD_TYPE.to_string(),
            checkout_attempt_id: config.checkout_attempt_id.clone(),
            blik_code: state.blik_code.value().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(code: &str) -> Validation {
        BlikCodeValidator.validate(&code.to_string(), &BlikDelegateState::default())
    }

    #[test]
    fn test_code_must_be_six_digits() {
        assert_eq!(validate("123456"), Validation::Valid);
        assert_eq!(validate("12345"), Validation::Invalid(BLIK_CODE_INVALID));
        assert_eq!(validate("1234567"), Validation::Invalid(BLIK_CODE_INVALID));
        assert_eq!(validate("12a456"), Validation::Invalid(BLIK_CODE_INVALID));
        assert_eq!(validate(""), Validation::Invalid(BLIK_CODE_INVALID));
    }

    #[test]
    fn test_whitespace_is_stripped() {
        assert_eq!(BlikCodeTransformer.transform(" 123 456 ".to_string()), "123456");
    }

    #[test]
    fn test_payment_method_serialization() {
        let state = BlikDelegateState {
            blik_code: FieldState::new("777123".to_string()),
        };
        let method = BlikForm::new().payment_method(&state, &FormConfig::default());
        let json = serde_json::to_value(&method).unwrap();
        assert_eq!(json, serde_json::json!({"type": "blik", "blikCode": "777123"}));
    }
}
