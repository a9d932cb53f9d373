//! Error types for the playground controllers.
//!
//! Controllers never fail for in-domain input. These errors only surface
//! through the name-based [`set_parameter`](crate::Playground::set_parameter)
//! path, where a caller hands over a parameter name and a loosely typed value.

use crate::Topic;

/// A specialized `Result` type for playground operations.
pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// Contract violations raised by the name-based playground API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaygroundError {
    /// The parameter name is not part of the topic's schema.
    #[error("Unknown parameter '{name}' for the {topic} playground")]
    UnknownParameter {
        /// Topic whose schema was consulted.
        topic: Topic,
        /// The rejected parameter name.
        name: String,
    },

    /// The value is not a member of the parameter's enumerated set.
    #[error("Invalid value '{value}' for '{parameter}': expected one of {expected}")]
    InvalidChoice {
        /// Parameter being set.
        parameter: &'static str,
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        expected: String,
    },

    /// A number was given for a choice parameter, or the other way round.
    #[error("Parameter '{parameter}' expects {expected}")]
    TypeMismatch {
        /// Parameter being set.
        parameter: &'static str,
        /// Human-readable description of the accepted kind.
        expected: &'static str,
    },

    /// The topic slug did not match any playground.
    #[error("Unknown topic '{0}': expected one of box-model, flex, grid, positioning, responsive")]
    UnknownTopic(String),
}

impl PlaygroundError {
    /// Creates a new `UnknownParameter` error.
    #[must_use]
    pub fn unknown_parameter(topic: Topic, name: impl Into<String>) -> Self {
        Self::UnknownParameter {
            topic,
            name: name.into(),
        }
    }

    /// Creates a new `InvalidChoice` error listing the accepted values.
    #[must_use]
    pub fn invalid_choice(
        parameter: &'static str,
        value: impl Into<String>,
        choices: &[&str],
    ) -> Self {
        Self::InvalidChoice {
            parameter,
            value: value.into(),
            expected: choices.join(", "),
        }
    }

    /// Creates a new `TypeMismatch` error.
    #[must_use]
    pub const fn type_mismatch(parameter: &'static str, expected: &'static str) -> Self {
        Self::TypeMismatch {
            parameter,
            expected,
        }
    }
}
