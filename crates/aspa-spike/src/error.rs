//! Error types for aspa-spike

use thiserror::Error;

/// Errors raised while reading, segmenting or summarizing spike trains
#[derive(Error, Debug)]
pub enum SpikeError {
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No spikes or intervals to work with")]
    EmptyTrain,

    #[error("Not enough data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid bins: {0}")]
    InvalidBins(String),

    #[error("Log scale needs positive values, got {value}")]
    NegativeValue { value: f64 },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for spike train operations
pub type SpikeResult<T> = Result<T, SpikeError>;
