use std::result::Result as StdResult;

use thiserror::Error;
use treso_config::ConfigError as CliConfigError;
use treso_core::CoreError as ServiceCoreError;

/// Unified error type for core/config/io layers.
#[derive(Error, Debug)]
pub enum TresorerieError {
    #[error("Transaction failed: {0}")]
    TransactionError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, TresorerieError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TresorerieError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<ServiceCoreError> for TresorerieError {
    fn from(err: ServiceCoreError) -> Self {
        match err {
            ServiceCoreError::TransactionNotFound(id) => {
                TresorerieError::TransactionError(format!("transaction {} not found", id))
            }
            ServiceCoreError::Validation(message) | ServiceCoreError::InvalidOperation(message) => {
                TresorerieError::InvalidInput(message)
            }
        }
    }
}

impl From<CliConfigError> for TresorerieError {
    fn from(err: CliConfigError) -> Self {
        match err {
            CliConfigError::Io(io) => TresorerieError::Io(io),
            CliConfigError::Serde(message) | CliConfigError::Invalid(message) => {
                TresorerieError::ConfigError(message)
            }
        }
    }
}

impl From<ServiceCoreError> for CliError {
    fn from(err: ServiceCoreError) -> Self {
        CliError::from(TresorerieError::from(err))
    }
}

impl From<CliConfigError> for CliError {
    fn from(err: CliConfigError) -> Self {
        CliError::from(TresorerieError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::from(TresorerieError::from(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::from(TresorerieError::from(err))
    }
}
