//! Error types for the gel calculator engine

use crate::validation::ValidationError;
use thiserror::Error;

/// Engine-wide error types
///
/// Every engine operation either returns a complete result or one of
/// these. None of them are retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A requested quantity (gel count, volume, weight, distance, pace,
    /// carb total) was zero, negative, or not a finite number
    #[error("Invalid quantity: {}", .0.user_message())]
    InvalidQuantity(ValidationError),

    /// The recipe selector did not match any known recipe
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    /// Engine configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Build an `InvalidQuantity` error for the given field
    pub fn invalid_quantity(field: &str, message: &str) -> Self {
        EngineError::InvalidQuantity(ValidationError::new(field, message))
    }

    /// Name of the offending input field, if this is a quantity error
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::InvalidQuantity(err) => Some(&err.field),
            _ => None,
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::InvalidQuantity(err)
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Result alias used throughout the engine
pub type EngineResult<T> = Result<T, EngineError>;
