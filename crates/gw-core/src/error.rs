//! Error handling for the gatewarden security layer.
//!
//! Error messages are designed to be informative for debugging while not
//! exposing credential material to end users.

use thiserror::Error;

/// Result type alias using the gatewarden error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gatewarden operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns whether this error was caused by invalid input or settings.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let error = Error::config("cluster url is empty");
        assert_eq!(error.to_string(), "configuration error: cluster url is empty");

        let error = Error::validation("port out of range");
        assert_eq!(error.to_string(), "validation error: port out of range");
    }

    #[test]
    fn error_categories() {
        assert!(Error::config("x").is_client_error());
        assert!(Error::validation("x").is_client_error());
        assert!(!Error::Internal("x".to_string()).is_client_error());
    }
}
