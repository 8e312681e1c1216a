//! Clients for external generation services.

pub mod gemini_api_agent;

pub use gemini_api_agent::GeminiClient;
