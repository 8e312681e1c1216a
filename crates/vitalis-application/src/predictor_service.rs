//! Stateless risk prediction from a manually filled form.

use std::sync::Arc;

use tracing::{info, warn};
use vitalis_core::error::Result;
use vitalis_core::generation::{ContentGenerator, GenerationRequest};
use vitalis_core::prediction::{AdHocInput, PredictionResult, decode_prediction};
use vitalis_core::schema::prediction_schema;

use crate::prompts::PromptLibrary;
use crate::request_state::InFlight;

pub struct PredictorService {
    generator: Arc<dyn ContentGenerator>,
    prompts: Arc<PromptLibrary>,
    in_flight: InFlight,
}

impl PredictorService {
    pub fn new(generator: Arc<dyn ContentGenerator>, prompts: Arc<PromptLibrary>) -> Self {
        Self {
            generator,
            prompts,
            in_flight: InFlight::new("prediction"),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Form values are used as entered; BMI only feeds the prompt.
    pub async fn predict(&self, form: &AdHocInput) -> Result<PredictionResult> {
        let _guard = self.in_flight.begin()?;

        let request =
            GenerationRequest::text(self.prompts.adhoc(form)?).with_schema(prediction_schema());

        info!(pipeline = "prediction", age = form.age, "requesting ad-hoc prediction");
        let payload = self
            .generator
            .generate(request)
            .await
            .inspect_err(|err| warn!(pipeline = "prediction", error = %err, "generation failed"))?;

        decode_prediction(&payload)
    }
}
