//! Educational topic lookup.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vitalis_core::error::Result;
use vitalis_core::generation::{ContentGenerator, GenerationRequest};
use vitalis_core::health_info::{HealthInfo, decode_health_info};
use vitalis_core::schema::health_info_schema;

use crate::prompts::PromptLibrary;
use crate::request_state::InFlight;

pub struct ContentService {
    generator: Arc<dyn ContentGenerator>,
    prompts: Arc<PromptLibrary>,
    in_flight: InFlight,
}

impl ContentService {
    pub fn new(generator: Arc<dyn ContentGenerator>, prompts: Arc<PromptLibrary>) -> Self {
        Self {
            generator,
            prompts,
            in_flight: InFlight::new("content"),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Fetches an article for `topic`. A blank topic is a no-op and returns
    /// `Ok(None)`.
    pub async fn lookup(&self, topic: &str) -> Result<Option<HealthInfo>> {
        let topic = topic.trim();
        if topic.is_empty() {
            debug!("empty topic ignored");
            return Ok(None);
        }

        let _guard = self.in_flight.begin()?;

        let request = GenerationRequest::text(self.prompts.health_info(topic)?)
            .with_schema(health_info_schema());

        info!(pipeline = "content", topic, "requesting health info");
        let payload = self
            .generator
            .generate(request)
            .await
            .inspect_err(|err| warn!(pipeline = "content", error = %err, "generation failed"))?;

        decode_health_info(&payload, topic).map(Some)
    }
}
