//! Error types for the CSS Mastery server.
//!
//! Every variant carries an actionable suggestion for the operator.

use std::path::PathBuf;

/// A specialized `Result` type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors raised while configuring or starting the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid JSON syntax in configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your mastery.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    /// The listening socket could not be bound.
    #[error("Failed to bind to {addr}: {message}\n\nSuggestion: Try a different port with --port")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Description of the failure.
        message: String,
    },

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `Bind` error.
    #[must_use]
    pub fn bind(addr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Bind {
            addr: addr.into(),
            message: message.into(),
        }
    }
}
