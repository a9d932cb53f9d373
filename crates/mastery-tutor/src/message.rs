//! Transcript entries and the snapshot handed to renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the learner.
    User,
    /// Produced by the tutor, including apologies for failed requests.
    Assistant,
}

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Who wrote the entry.
    pub role: Role,
    /// Entry text. Assistant replies may contain Markdown.
    pub text: String,
    /// `true` for the apology appended when a request fails.
    #[serde(default)]
    pub is_error: bool,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a user entry stamped now.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), false)
    }

    /// Creates an assistant entry stamped now.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into(), false)
    }

    /// Creates an assistant entry flagged as an error.
    #[must_use]
    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into(), true)
    }

    fn new(role: Role, text: String, is_error: bool) -> Self {
        Self {
            role,
            text,
            is_error,
            timestamp: Utc::now(),
        }
    }
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    /// Transcript in append order.
    pub messages: Vec<ChatMessage>,
    /// A request is outstanding; input should be disabled.
    pub busy: bool,
    /// The chat panel is visible.
    pub open: bool,
}
