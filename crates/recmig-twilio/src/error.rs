//! Twilio error types.

use thiserror::Error;

/// Result type for Twilio operations.
pub type TwilioResult<T> = Result<T, TwilioError>;

/// Errors that can occur during Twilio operations.
#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP {status} - {reason}")]
    Http { status: u16, reason: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TwilioError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Build an error from a non-success HTTP status.
    pub fn from_http_status(status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            status,
            reason: reason.into(),
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            TwilioError::Http { status, .. } => Some(*status),
            TwilioError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
