use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("no strategy registered for field {field}")]
    MissingStrategy { field: String },
    #[error("field {field} registered more than once")]
    DuplicateStrategy { field: String },
    #[error("field {field} holds values of type {actual}, requested as {expected}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    /// Configuration and type-recovery failures mean the registry is out of
    /// sync with the declared field set; they are never caused by shopper input.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            FormError::MissingStrategy { .. }
                | FormError::DuplicateStrategy { .. }
                | FormError::FieldTypeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programming_error_classification() {
        let missing = FormError::MissingStrategy {
            field: "PHONE_NUMBER".to_string(),
        };
        assert!(missing.is_programming_error());
        assert_eq!(
            missing.to_string(),
            "no strategy registered for field PHONE_NUMBER"
        );

        let event = FormError::InvalidEvent("focus event without a field".to_string());
        assert!(!event.is_programming_error());
    }
}
