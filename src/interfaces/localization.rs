use crate::domain::field::ErrorRef;
use crate::domain::ports::Localizer;
use crate::forms::{blik, mbway};

/// English texts for the built-in forms. Unknown keys are shown as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn localize(&self, reason: ErrorRef) -> String {
        let text = match reason {
            mbway::COUNTRY_CODE_INVALID => "Select a country",
            mbway::PHONE_NUMBER_INVALID => "Enter a valid mobile number",
            blik::BLIK_CODE_INVALID => "Enter a valid 6-digit BLIK code",
            other => other.key(),
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_keys() {
        let localizer = EnglishLocalizer;
        assert_eq!(
            localizer.localize(mbway::PHONE_NUMBER_INVALID),
            "Enter a valid mobile number"
        );
        assert_eq!(localizer.localize(ErrorRef::new("custom.key")), "custom.key");
    }
}
