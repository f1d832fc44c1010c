use crate::error::FormError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount of a payment, in major units of `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount {
    currency: String,
    value: Decimal,
}

#[derive(Deserialize)]
struct RawAmount {
    currency: String,
    value: Decimal,
}

impl Amount {
    pub fn new(currency: impl Into<String>, value: Decimal) -> Result<Self, FormError> {
        let currency = currency.into();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(FormError::InvalidAmount(format!(
                "currency must be a three letter ISO code, got {currency:?}"
            )));
        }
        if value < Decimal::ZERO {
            return Err(FormError::InvalidAmount(
                "Amount must not be negative".to_string(),
            ));
        }
        Ok(Self { currency, value })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl TryFrom<RawAmount> for Amount {
    type Error = FormError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        Self::new(raw.currency, raw.value)
    }
}

/// Reference to a partial-payment order the payment belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub psp_reference: String,
    pub order_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentComponentData<P> {
    pub payment_method: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
}

/// Payload handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentState<P> {
    pub data: PaymentComponentData<P>,
    pub is_input_valid: bool,
    pub is_ready: bool,
}

impl<P> ComponentState<P> {
    pub fn is_valid(&self) -> bool {
        self.is_input_valid && self.is_ready
    }
}
