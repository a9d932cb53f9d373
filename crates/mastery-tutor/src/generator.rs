//! The text-generation capability the tutor calls out to.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{Result, TutorError};

/// One prompt for the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The learner's trimmed question.
    pub prompt: String,
    /// Persona the model answers as.
    pub system_instruction: String,
}

/// Something that turns a prompt into reply text.
///
/// Implementations make exactly one attempt per call. An `Ok` with empty text
/// is a valid outcome; the session decides what to show for it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Generates a reply for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// A generator that replays queued outcomes in order.
///
/// Once the queue is empty every call fails with a network error. For tests
/// that must not reach the network.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<Result<String>>>,
    delay: Duration,
    gate: Option<Arc<Notify>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Creates a generator with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    #[must_use]
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn fail(self, error: TutorError) -> Self {
        self.push(Err(error));
        self
    }

    /// Waits this long before answering each call.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Holds each call until `gate` is notified once per call.
    ///
    /// A notification sent before the call arrives is kept, so releasing early
    /// is fine.
    #[must_use]
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queues another outcome on a shared generator.
    pub fn push(&self, outcome: Result<String>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Prompts received so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.prompt.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TutorError::Network("script exhausted".into())))
    }
}
