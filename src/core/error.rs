//! Error types for core module
//!
//! Covers settings persistence. Everything else in the application reports
//! through the game and networking error types.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Log filter directive did not parse
    #[error("Invalid log filter {filter:?}: {reason}")]
    LogFilter { filter: String, reason: String },

    /// A global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    LoggingInit(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
