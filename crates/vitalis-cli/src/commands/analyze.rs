use std::path::Path;

use anyhow::{Result, anyhow, bail};
use tracing::info;
use vitalis_application::RequestState;
use vitalis_application::analysis_service::MISSING_INPUT;
use vitalis_infrastructure::upload::load_document;

use crate::app::App;
use crate::render;

pub const ANALYSIS_FAILED: &str =
    "Failed to get an analysis from the AI. Please check your API key and try again.";

pub async fn run(app: &App, text: Option<&str>, file: Option<&Path>) -> Result<()> {
    let context = app.require_session()?;
    let text = text.unwrap_or_default();
    if text.trim().is_empty() && file.is_none() {
        bail!(MISSING_INPUT);
    }

    let upload = match file {
        Some(path) => Some(load_document(path).await?),
        None => None,
    };

    let pipelines = app.pipelines().await?;
    render::hint("Analyzing...");
    let result = pipelines
        .analysis
        .analyze(context, text, upload.as_ref())
        .await
        .inspect_err(|err| info!(error = %err, "analysis failed"));

    match RequestState::settle(result, ANALYSIS_FAILED) {
        RequestState::Ready(prediction) => {
            render::prediction(&prediction);
            Ok(())
        }
        state => Err(anyhow!(state.error().unwrap_or(ANALYSIS_FAILED).to_string())),
    }
}
