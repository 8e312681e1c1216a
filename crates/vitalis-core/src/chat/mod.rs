//! Chat widget conversation model.

pub mod model;

pub use model::{ChatMessage, ChatRole, ChatTranscript, FALLBACK_REPLY, GREETING};
