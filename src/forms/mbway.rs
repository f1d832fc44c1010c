use crate::config::FormConfig;
use crate::domain::country::CountryModel;
use crate::domain::field::{ErrorRef, FieldState, Validation};
use crate::domain::ports::{CountryCatalog, PaymentForm};
use crate::domain::registry::FieldRegistry;
use crate::domain::strategy::{FieldStrategy, FieldTransformer, FieldValidator, StateAccessor};
use crate::domain::view::ViewFieldState;
use crate::error::Result;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

pub const PAYMENT_METHOD_TYPE: &str = "mbway";

const ISO_CODE_PORTUGAL: &str = "PT";
const ISO_CODE_SPAIN: &str = "ES";
const SUPPORTED_COUNTRIES: &[&str] = &[ISO_CODE_PORTUGAL, ISO_CODE_SPAIN];

pub const COUNTRY_CODE_INVALID: ErrorRef = ErrorRef::new("checkout_mbway_country_code_invalid");
pub const PHONE_NUMBER_INVALID: ErrorRef = ErrorRef::new("checkout_mbway_phone_number_invalid");

/// Bounds on the number of digits of a full phone number, calling code included.
const PHONE_NUMBER_MIN_DIGITS: usize = 9;
const PHONE_NUMBER_MAX_DIGITS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum MBWayFieldId {
    CountryCode,
    PhoneNumber,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MBWayDelegateState {
    pub country_code: FieldState<Option<CountryModel>>,
    pub phone_number: FieldState<String>,
}

impl MBWayDelegateState {
    pub fn calling_code(&self) -> &str {
        self.country_code
            .value()
            .as_ref()
            .map(|country| country.calling_code.as_str())
            .unwrap_or_default()
    }
}

struct CountryCodeAccessor;

impl StateAccessor<MBWayDelegateState, Option<CountryModel>> for CountryCodeAccessor {
    fn get<'a>(&self, state: &'a MBWayDelegateState) -> &'a FieldState<Option<CountryModel>> {
        &state.country_code
    }

    fn set(&self, state: &mut MBWayDelegateState, field_state: FieldState<Option<CountryModel>>) {
        state.country_code = field_state;
    }
}

struct PhoneNumberAccessor;

impl StateAccessor<MBWayDelegateState, String> for PhoneNumberAccessor {
    fn get<'a>(&self, state: &'a MBWayDelegateState) -> &'a FieldState<String> {
        &state.phone_number
    }

    fn set(&self, state: &mut MBWayDelegateState, field_state: FieldState<String>) {
        state.phone_number = field_state;
    }
}

/// Leading zeros would end up between the calling code and the number.
pub struct PhoneNumberTransformer;

impl FieldTransformer<String> for PhoneNumberTransformer {
    fn transform(&self, value: String) -> String {
        value.trim_start_matches('0').to_string()
    }
}

pub struct CountryCodeValidator;

impl FieldValidator<MBWayDelegateState, Option<CountryModel>> for CountryCodeValidator {
    fn validate(&self, value: &Option<CountryModel>, _state: &MBWayDelegateState) -> Validation {
        match value {
            Some(_) => Validation::Valid,
            None => Validation::Invalid(COUNTRY_CODE_INVALID),
        }
    }
}

/// Checks the number as it will be submitted: calling code plus local number.
pub struct PhoneNumberValidator;

impl FieldValidator<MBWayDelegateState, String> for PhoneNumberValidator {
    fn validate(&self, value: &String, state: &MBWayDelegateState) -> Validation {
        let full_number = format!("{}{}", state.calling_code(), value);
        let digits = full_number.chars().filter(char::is_ascii_digit).count();
        if !value.is_empty() && (PHONE_NUMBER_MIN_DIGITS..=PHONE_NUMBER_MAX_DIGITS).contains(&digits) {
            Validation::Valid
        } else {
            Validation::Invalid(PHONE_NUMBER_INVALID)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MBWayViewState {
    /// Display-only: the options of the country picker. Comes from the
    /// country catalog, not from the domain state.
    pub countries: Vec<CountryModel>,
    pub country_code_field_state: ViewFieldState<Option<CountryModel>>,
    pub phone_number_field_state: ViewFieldState<String>,
    /// Display-only: label shown in front of the phone number input, derived
    /// from the selected country.
    pub phone_number_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MBWayPaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_attempt_id: Option<String>,
    pub telephone_number: String,
}

/// The MBWay form: a country picker limited to Portugal and Spain, and a
/// local phone number.
#[derive(Debug, Clone)]
pub struct MBWayForm {
    countries: Vec<CountryModel>,
}

impl MBWayForm {
    pub fn new(catalog: &dyn CountryCatalog, config: &FormConfig) -> Self {
        Self {
            countries: catalog.localized_countries(config.language(), Some(SUPPORTED_COUNTRIES)),
        }
    }

    pub fn supported_countries(&self) -> &[CountryModel] {
        &self.countries
    }

    /// Portugal when available, otherwise the first supported country.
    pub fn initially_selected_country(&self) -> Option<&CountryModel> {
        self.countries
            .iter()
            .find(|country| country.iso_code == ISO_CODE_PORTUGAL)
            .or_else(|| self.countries.first())
    }

    pub fn find_country(&self, iso_code: &str) -> Option<&CountryModel> {
        self.countries
            .iter()
            .find(|country| country.iso_code.eq_ignore_ascii_case(iso_code))
    }
}

impl PaymentForm for MBWayForm {
    type FieldId = MBWayFieldId;
    type State = MBWayDelegateState;
    type ViewState = MBWayViewState;
    type PaymentMethod = MBWayPaymentMethod;

    fn payment_method_type(&self) -> &'static str {
        PAYMENT_METHOD_TYPE
    }

    fn create_default_state(&self) -> MBWayDelegateState {
        MBWayDelegateState {
            country_code: FieldState::new(self.initially_selected_country().cloned()),
            phone_number: FieldState::new(String::new()),
        }
    }

    fn create_registry(&self) -> Result<FieldRegistry<MBWayFieldId, MBWayDelegateState>> {
        FieldRegistry::builder()
            .register(
                MBWayFieldId::CountryCode,
                FieldStrategy::new(CountryCodeAccessor).with_validator(CountryCodeValidator),
            )
            .register(
                MBWayFieldId::PhoneNumber,
                FieldStrategy::new(PhoneNumberAccessor)
                    .with_transformer(PhoneNumberTransformer)
                    .with_validator(PhoneNumberValidator),
            )
            .build()
    }

    fn project(&self, state: &MBWayDelegateState) -> MBWayViewState {
        MBWayViewState {
            countries: self.countries.clone(),
            country_code_field_state: ViewFieldState::from(&state.country_code),
            phone_number_field_state: ViewFieldState::from(&state.phone_number),
            phone_number_prefix: state
                .country_code
                .value()
                .as_ref()
                .map(CountryModel::to_short_string)
                .unwrap_or_default(),
        }
    }

    fn payment_method(&self, state: &MBWayDelegateState, config: &FormConfig) -> MBWayPaymentMethod {
        MBWayPaymentMethod {
            kind: PAYMENT_METHOD_TYPE.to_string(),
            checkout_attempt_id: config.checkout_attempt_id.clone(),
            telephone_number: format!("{}{}", state.calling_code(), state.phone_number.value()),
        }
    }
}
