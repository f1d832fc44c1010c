use crate::domain::component::{Amount, OrderRequest};
use serde::Deserialize;
use std::path::Path;

/// Controls when a field's error message is computed while the shopper types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Value updates clear the error; validation runs on blur or highlight.
    #[default]
    OnBlur,
    /// Value updates recompute the error immediately.
    Eager,
}

/// Per-form configuration, shared by every payment method form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub validation_mode: ValidationMode,
    /// BCP 47 style tag, only the language part is used for country names.
    pub shopper_locale: String,
    pub amount: Option<Amount>,
    pub order: Option<OrderRequest>,
    pub checkout_attempt_id: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::OnBlur,
            shopper_locale: "en-US".to_string(),
            amount: None,
            order: None,
            checkout_attempt_id: None,
        }
    }
}

impl FormConfig {
    /// Loads a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn language(&self) -> &str {
        self.shopper_locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.validation_mode, ValidationMode::OnBlur);
        assert_eq!(config.language(), "en");
        assert!(config.amount.is_none());
    }

    #[test]
    fn test_language_from_locale() {
        let config = FormConfig {
            shopper_locale: "pt_PT".to_string(),
            ..FormConfig::default()
        };
        assert_eq!(config.language(), "pt");
    }

    #[test]
    fn test_config_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"validationMode": "eager", "shopperLocale": "es-ES", "amount": {{"currency": "EUR", "value": "12.50"}}}}"#
        )
        .unwrap();

        let config = FormConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.validation_mode, ValidationMode::Eager);
        assert_eq!(config.language(), "es");
        assert_eq!(config.amount.unwrap().value(), dec!(12.50));
        assert!(config.checkout_attempt_id.is_none());
    }
}
