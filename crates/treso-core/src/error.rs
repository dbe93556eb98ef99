use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<treso_domain::DateWindowError> for CoreError {
    fn from(err: treso_domain::DateWindowError) -> Self {
        CoreError::InvalidOperation(err.to_string())
    }
}
