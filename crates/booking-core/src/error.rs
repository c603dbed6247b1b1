use booking_domain::{FieldId, UnknownFieldError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Step {0} does not exist (expected 1-6)")]
    InvalidStep(u8),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: FieldId, message: String },
    #[error("Field {0} cannot be set directly")]
    ReadOnlyField(FieldId),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl CoreError {
    pub fn invalid_value(field: FieldId, message: impl Into<String>) -> Self {
        CoreError::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

impl From<UnknownFieldError> for CoreError {
    fn from(err: UnknownFieldError) -> Self {
        CoreError::UnknownField(err.0)
    }
}
