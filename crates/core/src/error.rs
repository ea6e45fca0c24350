//! Error types for Sigtheory Core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid target rate {target} Hz for a signal sampled at {signal_rate} Hz")]
    InvalidRate { target: f64, signal_rate: f64 },

    #[error("Invalid length: {msg}")]
    InvalidLength { msg: String },

    #[error("Signal must contain at least one sample")]
    EmptySignal,

    #[error("Input `{name}` must contain at least one sample")]
    EmptyInput { name: &'static str },

    #[error("Kernel length {kernel} exceeds observed signal length {observed}")]
    Dimension { kernel: usize, observed: usize },

    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: f64 },

    #[error("Invalid regularization: {value} (must be >= 0)")]
    InvalidRegularization { value: f64 },
}

/// Result type for Sigtheory Core operations
pub type Result<T> = std::result::Result<T, CoreError>;
