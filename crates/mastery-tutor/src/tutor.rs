//! Async handle over a shared [`ChatSession`].

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info};

use crate::error::{Result, TutorError};
use crate::generator::{GenerationRequest, TextGenerator};
use crate::message::{ChatMessage, ChatSnapshot};
use crate::session::ChatSession;

fn lock(session: &Mutex<ChatSession>) -> MutexGuard<'_, ChatSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared tutor: the session plus the generator it calls.
///
/// Clones share one session. The session lock is never held across an
/// `.await`; the outbound call runs unlocked.
#[derive(Clone)]
pub struct Tutor {
    session: Arc<Mutex<ChatSession>>,
    generator: Arc<dyn TextGenerator>,
}

impl fmt::Debug for Tutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tutor")
            .field("session", &self.session)
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl Tutor {
    /// Creates a tutor with a fresh session.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            session: Arc::new(Mutex::new(ChatSession::new())),
            generator,
        }
    }

    /// Accepts `text` if the session is idle and the text is not blank.
    ///
    /// The returned guard owns the outstanding request. Resolve it to make the
    /// call; dropping it unresolved records a failure.
    #[must_use]
    pub fn submit(&self, text: &str) -> Option<PendingReply> {
        let (request, user_message) = {
            let mut session = lock(&self.session);
            let request = session.begin(text)?;
            let user_message = session
                .messages()
                .last()
                .cloned()
                .unwrap_or_else(|| ChatMessage::user(&request.prompt));
            (request, user_message)
        };
        info!(
            generator = self.generator.name(),
            len = request.prompt.len(),
            "Tutor request accepted"
        );
        Some(PendingReply {
            session: Arc::downgrade(&self.session),
            generator: Arc::clone(&self.generator),
            request,
            user_message,
            settled: false,
        })
    }

    /// Submits `text` and waits for the reply entry.
    ///
    /// Returns `None` if the submission was not accepted.
    pub async fn ask(&self, text: &str) -> Option<ChatMessage> {
        self.submit(text)?.resolve().await
    }

    /// Hides the panel.
    pub fn close(&self) {
        lock(&self.session).close();
    }

    /// Shows the panel.
    pub fn reopen(&self) {
        lock(&self.session).reopen();
    }

    /// Shows or hides the panel.
    pub fn set_open(&self, open: bool) {
        if open {
            self.reopen();
        } else {
            self.close();
        }
    }

    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        lock(&self.session).is_busy()
    }

    /// Copies the session for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ChatSnapshot {
        lock(&self.session).snapshot()
    }
}

/// The single outstanding request of a session.
///
/// Settles the session exactly once: through [`resolve`](Self::resolve),
/// [`settle`](Self::settle), or on drop with [`TutorError::Abandoned`]. Holds
/// the session weakly, so a reply arriving after every [`Tutor`] is gone is
/// discarded.
pub struct PendingReply {
    session: Weak<Mutex<ChatSession>>,
    generator: Arc<dyn TextGenerator>,
    request: GenerationRequest,
    user_message: ChatMessage,
    settled: bool,
}

impl fmt::Debug for PendingReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingReply")
            .field("request", &self.request)
            .field("settled", &self.settled)
            .finish_non_exhaustive()
    }
}

impl PendingReply {
    /// The request that will be sent.
    #[must_use]
    pub const fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// The user entry appended when the submission was accepted.
    #[must_use]
    pub const fn user_message(&self) -> &ChatMessage {
        &self.user_message
    }

    /// Calls the generator once and records the outcome.
    ///
    /// Returns the appended assistant entry, or `None` if the session was torn
    /// down while the call was in flight.
    pub async fn resolve(mut self) -> Option<ChatMessage> {
        let outcome = self.generator.generate(&self.request).await;
        self.apply(outcome)
    }

    /// Records an outcome obtained elsewhere.
    pub fn settle(mut self, outcome: Result<String>) -> Option<ChatMessage> {
        self.apply(outcome)
    }

    fn apply(&mut self, outcome: Result<String>) -> Option<ChatMessage> {
        self.settled = true;
        let Some(session) = self.session.upgrade() else {
            debug!(
                ok = outcome.is_ok(),
                "Session torn down; discarding late reply"
            );
            return None;
        };
        let reply = lock(&session).finish(outcome);
        Some(reply)
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        if !self.settled {
            self.apply(Err(TutorError::Abandoned));
        }
    }
}
