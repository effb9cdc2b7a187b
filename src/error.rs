// src/error.rs

//! Unified error handling for the certificate tracker.

use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request to the board API failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Board API answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    /// Board API returned an error list
    #[error("monday.com API error: {0}")]
    Upstream(String),

    /// Board API did not answer within the configured timeout
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request input validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an upstream error from the board API's error payload.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message() {
        let err = AppError::Transport { status: 502 };
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(AppError::config("bad"), AppError::Config(ref m) if m == "bad"));
        assert_eq!(
            AppError::validation("blank").to_string(),
            "Validation error: blank"
        );
    }
}
