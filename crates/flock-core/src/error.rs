//! Centralized error types for the form engine.

use thiserror::Error;

/// Main error type for form engine operations.
#[derive(Error, Debug)]
pub enum FlockError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Field '{0}' does not load remote options")]
    NoRemoteOptions(String),

    #[error("Invalid modal transition: cannot {action} while {phase}")]
    InvalidTransition { action: String, phase: String },

    #[error("Option lookup failed: {0}")]
    OptionLookup(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for form engine operations.
pub type FlockResult<T> = Result<T, FlockError>;

impl FlockError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an invalid transition error.
    pub fn transition(action: impl Into<String>, phase: impl std::fmt::Display) -> Self {
        Self::InvalidTransition {
            action: action.into(),
            phase: phase.to_string(),
        }
    }
}
