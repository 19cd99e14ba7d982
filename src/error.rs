//! Error types shared across training and serving

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, ProgressionError>;

/// Main error type for the progression crate
#[derive(Error, Debug)]
pub enum ProgressionError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    NotFitted,

    #[error("Computation error: {0}")]
    Computation(String),
}

impl From<polars::error::PolarsError> for ProgressionError {
    fn from(err: polars::error::PolarsError) -> Self {
        ProgressionError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for ProgressionError {
    fn from(err: serde_json::Error) -> Self {
        ProgressionError::Serialization(err.to_string())
    }
}
