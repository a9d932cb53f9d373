//! CSS Mastery Tutor
//!
//! A chat session that forwards free-text CSS questions to a text-generation
//! service and records the answers. At most one request is outstanding per
//! session; every accepted question ends in exactly one assistant entry,
//! either the reply or an apology.

pub mod error;
pub mod gemini;
mod generator;
mod message;
pub mod persona;
mod session;
mod tutor;

pub use error::{LlmErrorKind, Result, TutorError};
pub use gemini::GeminiClient;
pub use generator::{GenerationRequest, ScriptedGenerator, TextGenerator};
pub use message::{ChatMessage, ChatSnapshot, Role};
pub use session::ChatSession;
pub use tutor::{PendingReply, Tutor};
