//! Error types for dbtune

use thiserror::Error;

/// Main error type for dbtune
#[derive(Error, Debug)]
pub enum TuneError {
    /// The remote target is unreachable or answered with a failure.
    /// Aborts the current episode; never retried at this layer.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Invalid knob bounds for '{name}': min {min} > max {max}")]
    InvalidKnobBounds { name: String, min: f64, max: f64 },

    #[error("Missing knob descriptor: {0}")]
    MissingKnob(String),

    #[error("Action vector length {actions} does not match knob count {knobs}")]
    ActionLengthMismatch { actions: usize, knobs: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for dbtune operations
pub type Result<T> = std::result::Result<T, TuneError>;
