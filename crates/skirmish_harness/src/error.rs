//! Error types for the harness.

use thiserror::Error;

/// Result type alias using [`HarnessError`].
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Top-level error type for headless match runs.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Room membership or delivery failed.
    #[error(transparent)]
    Relay(#[from] skirmish_relay::RelayError),

    /// Core rejected a config or payload.
    #[error(transparent)]
    Core(#[from] skirmish_core::error::CoreError),

    /// Report serialization failed.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// Reading a config file or writing a report failed.
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}
