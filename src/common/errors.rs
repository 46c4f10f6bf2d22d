//! Error types for the decision core and the replay harness

use thiserror::Error;

/// Result type alias using our EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for engine operations
///
/// Percent-change calculations against a zero reference are not errors;
/// they are defined as "no change" and never surface here.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The book snapshot does not carry enough price levels for the policy
    #[error("Insufficient book depth: {actual} levels, at least {required} required")]
    InsufficientDepth { required: usize, actual: usize },

    /// Instrument reference data cannot be used for tick arithmetic
    #[error("Invalid instrument: {0}")]
    InvalidInstrument(String),

    /// No instrument definition for the requested symbol
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Replay file I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Channel send errors
    #[error("Channel send error: {0}")]
    ChannelSend(String),
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Configuration(err.to_string())
    }
}
