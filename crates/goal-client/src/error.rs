//! Error types for the goal client crate.

use planit_core::Error as CoreError;
use thiserror::Error;

/// Result type alias for goal client operations.
pub type Result<T> = std::result::Result<T, GoalClientError>;

/// Errors that can occur while talking to the Goal Service.
#[derive(Debug, Error)]
pub enum GoalClientError {
    /// HTTP client error (connection refused, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the Goal Service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Client misconfiguration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GoalClientError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<GoalClientError> for CoreError {
    fn from(err: GoalClientError) -> Self {
        match err {
            GoalClientError::Api { status, message } => CoreError::service(status, message),
            GoalClientError::Http(e) => CoreError::transport(e.to_string()),
            GoalClientError::Json(e) => CoreError::Unexpected(e.to_string()),
            GoalClientError::InvalidConfig(message) => CoreError::Unexpected(message),
        }
    }
}
