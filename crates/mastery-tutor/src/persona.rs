//! Fixed texts the tutor speaks or sends.

/// First transcript entry of every session.
pub const GREETING: &str =
    "Hi! I am your AI CSS Tutor. Ask me anything about selectors, layout, or design!";

/// Appended when the model answers with no text.
pub const EMPTY_REPLY: &str = "I couldn't generate a response. Please try again.";

/// Appended, flagged as an error, when a request fails for any reason.
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error connecting to the AI service.";

/// System instruction sent with every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class Senior Frontend Engineer and CSS Educator.
Your goal is to answer CSS questions concisely and accurately.
- Provide code snippets where relevant.
- Explain \"why\" something works, not just \"how\".
- Keep answers focused on modern CSS (Flexbox, Grid, Custom Properties).
- If the user asks for code, provide clean, commented CSS.
- Use Markdown formatting.";
