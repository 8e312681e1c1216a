//! Profile-aware analysis of a description and/or an uploaded document.

use std::sync::Arc;

use tracing::{info, warn};
use vitalis_core::clock::Clock;
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::generation::{ContentGenerator, DocumentUpload, GenerationRequest};
use vitalis_core::patient::PatientSummary;
use vitalis_core::prediction::{PredictionResult, decode_prediction};
use vitalis_core::schema::prediction_schema;
use vitalis_core::session::SessionContext;

use crate::prompts::PromptLibrary;
use crate::request_state::InFlight;

pub const MISSING_INPUT: &str = "Please provide some input or upload a file to analyze.";

pub struct AnalysisService {
    generator: Arc<dyn ContentGenerator>,
    prompts: Arc<PromptLibrary>,
    clock: Arc<dyn Clock>,
    in_flight: InFlight,
}

impl AnalysisService {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        prompts: Arc<PromptLibrary>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            generator,
            prompts,
            clock,
            in_flight: InFlight::new("analysis"),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Requests a structured risk analysis for the session's patient.
    ///
    /// Fails with a validation error, without contacting the service, when
    /// the description is blank and there is no upload. A single failure is
    /// returned as-is; nothing is retried.
    pub async fn analyze(
        &self,
        session: &SessionContext,
        description: &str,
        upload: Option<&DocumentUpload>,
    ) -> Result<PredictionResult> {
        if description.trim().is_empty() && upload.is_none() {
            return Err(VitalisError::validation(MISSING_INPUT));
        }

        let _guard = self.in_flight.begin()?;

        let summary =
            PatientSummary::build(&session.patient, &session.daily_logs, self.clock.today());
        let prompt = self.prompts.analysis(&summary, description)?;

        let mut request = GenerationRequest::text(prompt).with_schema(prediction_schema());
        if let Some(upload) = upload {
            request = request.with_part(upload.to_inline_part());
        }

        info!(
            pipeline = "analysis",
            patient_id = %session.patient.patient_id,
            upload = upload.map(|u| u.mime_type.as_str()),
            "requesting analysis"
        );

        let payload = self
            .generator
            .generate(request)
            .await
            .inspect_err(|err| warn!(pipeline = "analysis", error = %err, "generation failed"))?;

        decode_prediction(&payload)
            .inspect_err(|err| warn!(pipeline = "analysis", error = %err, "unusable response"))
    }
}
