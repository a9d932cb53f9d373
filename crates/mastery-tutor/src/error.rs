//! Error types for the tutor's outbound text-generation call.
//!
//! None of these reach the user directly. The chat session turns every one of
//! them into the same apologetic transcript entry. They exist so the failure
//! can be logged with enough detail to act on.

/// A specialized `Result` type for text generation.
pub type Result<T> = std::result::Result<T, TutorError>;

/// Failure of a single text-generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TutorError {
    /// No API key was configured; no request was sent.
    #[error("API key is missing: '{var}' is not set\n\nSuggestion: Export {var} with a valid API key")]
    MissingCredential {
        /// Environment variable that was consulted.
        var: String,
    },

    /// The request never produced an HTTP response.
    #[error("Network error: {0}\n\nSuggestion: Check your network connection")]
    Network(String),

    /// The upstream answered with a non-success status.
    #[error("LLM API error ({kind}, HTTP {status}): {message}\n\nSuggestion: {suggestion}")]
    Api {
        /// Classified error kind.
        kind: LlmErrorKind,
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
        /// Actionable suggestion for the operator.
        suggestion: String,
    },

    /// The upstream answered with a body that could not be decoded.
    #[error("Malformed response from LLM API: {0}")]
    Decode(String),

    /// The pending request was dropped before it completed.
    #[error("Request was abandoned before completion")]
    Abandoned,
}

/// Categories of LLM API errors for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Invalid or expired API key (401, 403).
    Authentication,
    /// Rate limit or quota exceeded (429).
    RateLimit,
    /// Server error (5xx responses).
    Server,
    /// Other unclassified errors.
    Other,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::RateLimit => write!(f, "rate_limit"),
            Self::Server => write!(f, "server"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl LlmErrorKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Authentication,
            429 => Self::RateLimit,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }

    /// Returns a suggestion message for this error kind.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::Authentication => "Check your API key or credentials",
            Self::RateLimit => "Wait a moment before asking again",
            Self::Server => "Retry later; the LLM service may be experiencing issues",
            Self::Other => "Check the LLM provider's status page",
        }
    }
}

impl TutorError {
    /// Creates a new `MissingCredential` error.
    #[must_use]
    pub fn missing_credential(var: impl Into<String>) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    /// Creates a new `Api` error, classifying the status and picking a suggestion.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        let kind = LlmErrorKind::from_status(status);
        Self::Api {
            kind,
            status,
            message: message.into(),
            suggestion: kind.suggestion().to_string(),
        }
    }
}
