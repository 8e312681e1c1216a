//! Application layer for Vitalis.
//!
//! Use cases that combine the session context, prompt templates and the
//! generation boundary.

pub mod analysis_service;
pub mod chat_service;
pub mod content_service;
pub mod predictor_service;
pub mod prompts;
pub mod request_state;
pub mod unavailable;

use std::sync::Arc;

use vitalis_core::clock::Clock;
use vitalis_core::error::Result;
use vitalis_core::generation::ContentGenerator;

pub use analysis_service::AnalysisService;
pub use chat_service::ChatService;
pub use content_service::ContentService;
pub use predictor_service::PredictorService;
pub use prompts::PromptLibrary;
pub use request_state::{InFlight, RequestState};
pub use unavailable::UnavailableGenerator;

/// The four pipelines wired to one generator.
pub struct Pipelines {
    pub analysis: AnalysisService,
    pub predictor: PredictorService,
    pub content: ContentService,
    pub chat: ChatService,
}

impl Pipelines {
    pub fn new(generator: Arc<dyn ContentGenerator>, clock: Arc<dyn Clock>) -> Result<Self> {
        let prompts = Arc::new(PromptLibrary::new()?);
        Ok(Self {
            analysis: AnalysisService::new(generator.clone(), prompts.clone(), clock),
            predictor: PredictorService::new(generator.clone(), prompts.clone()),
            content: ContentService::new(generator.clone(), prompts.clone()),
            chat: ChatService::new(generator, prompts),
        })
    }
}
