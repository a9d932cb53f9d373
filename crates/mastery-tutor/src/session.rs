//! Chat session state: transcript, busy flag and panel visibility.

use tracing::{debug, warn};

use crate::error::Result;
use crate::generator::GenerationRequest;
use crate::message::{ChatMessage, ChatSnapshot};
use crate::persona::{EMPTY_REPLY, FAILURE_REPLY, GREETING, SYSTEM_INSTRUCTION};

/// Chat session state.
///
/// The transcript only grows. While `busy` is set no new submission is
/// accepted; every accepted submission is followed by exactly one
/// [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    busy: bool,
    open: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Creates a session holding only the greeting, idle and closed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            busy: false,
            open: false,
        }
    }

    /// Accepts a submission if possible.
    ///
    /// Returns `None` and changes nothing when `text` is blank or a request is
    /// already outstanding. Otherwise appends the trimmed text as a user entry,
    /// marks the session busy and returns the request to send.
    pub fn begin(&mut self, text: &str) -> Option<GenerationRequest> {
        let prompt = text.trim();
        if prompt.is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }
        if self.busy {
            debug!(len = prompt.len(), "Ignoring submission while a request is outstanding");
            return None;
        }

        self.messages.push(ChatMessage::user(prompt));
        self.busy = true;
        Some(GenerationRequest {
            prompt: prompt.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        })
    }

    /// Records the outcome of the outstanding request and clears `busy`.
    ///
    /// Returns a copy of the appended entry.
    pub fn finish(&mut self, outcome: Result<String>) -> ChatMessage {
        let message = match outcome {
            Ok(text) if text.is_empty() => ChatMessage::assistant(EMPTY_REPLY),
            Ok(text) => ChatMessage::assistant(text),
            Err(e) => {
                warn!(error = %e, "Tutor request failed");
                ChatMessage::assistant_error(FAILURE_REPLY)
            }
        };
        self.messages.push(message.clone());
        self.busy = false;
        message
    }

    /// Hides the panel. The transcript and any outstanding request are kept.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Shows the panel.
    pub fn reopen(&mut self) {
        self.open = true;
    }

    /// Transcript in append order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns `true` if the panel is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Copies the session for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.messages.clone(),
            busy: self.busy,
            open: self.open,
        }
    }
}
