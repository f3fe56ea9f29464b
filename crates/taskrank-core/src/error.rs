//! Core error types for taskrank-core.
//!
//! Validation failures are fatal to a single call and always name the task
//! index and field. Per-task warnings (dangling dependency ids, cycles) are not
//! errors and travel with the scored task instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The submitted batch failed validation
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Strategy name not in the built-in table
    #[error("unknown strategy '{0}' (expected one of: smart_balance, fastest_wins, deadline_driven, high_impact)")]
    UnknownStrategy(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Batch validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `tasks` was something other than a JSON array
    #[error("'tasks' must be a list")]
    NotAList,

    /// A batch entry was not a JSON object
    #[error("task {index}: expected an object")]
    NotAnObject { index: usize },

    /// Required field absent or null
    #[error("task {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// Field present but unusable
    #[error("task {index}: invalid value for '{field}': {message}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    /// Index of the offending task, if the error is task-specific.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::NotAList => None,
            ValidationError::NotAnObject { index }
            | ValidationError::MissingField { index, .. }
            | ValidationError::InvalidValue { index, .. } => Some(*index),
        }
    }

    /// Name of the offending field, if the error is field-specific.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field, .. }
            | ValidationError::InvalidValue { field, .. } => Some(field),
            ValidationError::NotAList => Some("tasks"),
            ValidationError::NotAnObject { .. } => None,
        }
    }
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

    /// Dot-path key does not exist
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_index_and_field() {
        let err = ValidationError::InvalidValue {
            index: 2,
            field: "importance",
            message: "must be between 1 and 10, got 11".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("task 2"));
        assert!(msg.contains("importance"));
        assert_eq!(err.index(), Some(2));
        assert_eq!(err.field(), Some("importance"));
    }

    #[test]
    fn test_core_error_wraps_validation() {
        let err: CoreError = ValidationError::NotAList.into();
        assert_eq!(err.to_string(), "invalid input: 'tasks' must be a list");
    }
}
