//! Error types for the price core

use thiserror::Error;

/// Errors that can occur while deriving features, loading artifacts or
/// running the prediction pipeline
#[derive(Error, Debug)]
pub enum PriceError {
    /// One of the pre-trained artifacts could not be read or decoded
    #[error("Artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    /// Feature metadata, scaler and model disagree with each other or with
    /// the derived feature schema
    #[error("Configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    /// A derived feature would divide by zero or by a non-finite value
    #[error("Domain violation: {field} requires a finite, nonzero {denominator} (got {value})")]
    DomainViolation {
        field: &'static str,
        denominator: &'static str,
        value: f64,
    },

    /// An input left the range enforced by the input surface
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for price core operations
pub type Result<T> = std::result::Result<T, PriceError>;
