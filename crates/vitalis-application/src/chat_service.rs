//! General-purpose health chat.
//!
//! Only the newest message is sent; the transcript is display state.

use std::sync::Arc;

use tracing::{info, warn};
use vitalis_core::chat::{ChatMessage, ChatTranscript, FALLBACK_REPLY};
use vitalis_core::error::Result;
use vitalis_core::generation::{ContentGenerator, GenerationRequest};

use crate::prompts::PromptLibrary;
use crate::request_state::InFlight;

pub struct ChatService {
    generator: Arc<dyn ContentGenerator>,
    prompts: Arc<PromptLibrary>,
    in_flight: InFlight,
}

impl ChatService {
    pub fn new(generator: Arc<dyn ContentGenerator>, prompts: Arc<PromptLibrary>) -> Self {
        Self {
            generator,
            prompts,
            in_flight: InFlight::new("chat"),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Appends the user message and the bot reply to `transcript` and
    /// returns the reply.
    ///
    /// Blank input is ignored. Service failures become the fallback reply
    /// instead of an error.
    pub async fn respond(
        &self,
        transcript: &mut ChatTranscript,
        input: &str,
    ) -> Result<Option<ChatMessage>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let _guard = self.in_flight.begin()?;
        transcript.push(ChatMessage::user(input));

        let reply = match self.ask(input).await {
            Ok(text) => text,
            Err(err) => {
                warn!(pipeline = "chat", error = %err, "falling back to canned reply");
                FALLBACK_REPLY.to_string()
            }
        };

        Ok(Some(transcript.push(ChatMessage::bot(reply)).clone()))
    }

    async fn ask(&self, input: &str) -> Result<String> {
        let request = GenerationRequest::text(self.prompts.chat(input)?);
        info!(pipeline = "chat", "requesting chat reply");
        let text = self.generator.generate(request).await?;
        Ok(text.trim().to_string())
    }
}
