/// Error types for the retry-backoff crate
use std::time::Duration;
use thiserror::Error;

/// Main error type for the crate's fallible edges.
///
/// The backoff loop itself never fails: per-attempt failures are absorbed
/// into backoff growth. Only configuration and logging setup can error.
#[derive(Error, Debug)]
pub enum BackoffError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging initialisation errors
    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Initial backoff of zero never grows
    #[error("Initial backoff must be greater than zero")]
    ZeroInitialBackoff,

    /// Initial backoff larger than the cap
    #[error("Initial backoff {initial:?} exceeds max backoff {max:?}")]
    InitialExceedsMax { initial: Duration, max: Duration },

    /// Log level or filter directive that cannot be parsed
    #[error("Invalid log level: {level}")]
    InvalidLogLevel { level: String },
}

/// Result type alias for convenience
pub type BackoffResult<T> = Result<T, BackoffError>;
