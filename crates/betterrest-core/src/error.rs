//! Core error types for betterrest-core.
//!
//! Internal failures are described with typed errors built on thiserror.
//! The only error a user ever sees is [`PredictionError`], which carries a
//! fixed message and none of the underlying cause.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for betterrest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model loading or evaluation errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Configuration directory could not be resolved or created
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Errors raised while loading or evaluating a sleep model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact could not be read
    #[error("Failed to load model artifact from {path}: {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact could not be parsed
    #[error("Failed to parse model artifact: {0}")]
    ParseFailed(String),

    /// Artifact parsed but its parameters are unusable
    #[error("Invalid model parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Input feature rejected by the model
    #[error("Feature '{name}' = {value} is outside the model domain")]
    FeatureOutOfDomain { name: &'static str, value: f64 },

    /// Model produced an unusable prediction
    #[error("Model produced an invalid prediction: {0} hours")]
    InvalidOutput(f64),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its permitted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Value not on the permitted step grid
    #[error("{field} must be a multiple of {step}, got {value}")]
    OffStep {
        field: &'static str,
        step: f64,
        value: f64,
    },

    /// Time of day could not be parsed
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// The one failure a bedtime prediction can report.
///
/// Whatever went wrong underneath (missing artifact, rejected feature,
/// nonsense output) collapses into this value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("there was a problem calculating your bedtime")]
pub struct PredictionError;

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_error_hides_cause() {
        assert_eq!(
            PredictionError.to_string(),
            "there was a problem calculating your bedtime"
        );
    }

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::InvalidTime("25:00".into()).into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid time '25:00': expected HH:MM"
        );
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = ValidationError::OutOfRange {
            field: "coffee_amount",
            min: 1.0,
            max: 20.0,
            value: 21.0,
        };
        assert_eq!(
            err.to_string(),
            "coffee_amount must be between 1 and 20, got 21"
        );
    }
}
