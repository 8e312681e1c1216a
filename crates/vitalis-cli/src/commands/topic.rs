use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::info;
use vitalis_application::RequestState;
use vitalis_core::health_info::PREDEFINED_TOPICS;

use crate::app::App;
use crate::render;

pub const TOPIC_FAILED: &str = "Sorry, I couldn't fetch information on that topic. Please try again.";

pub async fn run(app: &App, topic: Option<&str>, html: Option<&Path>) -> Result<()> {
    app.require_session()?;

    let Some(topic) = topic.map(str::trim).filter(|topic| !topic.is_empty()) else {
        render::heading("Health Resources");
        for suggestion in PREDEFINED_TOPICS {
            println!("  - {suggestion}");
        }
        render::hint("Run `vitalis topic \"<topic>\"` to read about one.");
        return Ok(());
    };

    let pipelines = app.pipelines().await?;
    render::hint(&format!("Looking up {topic}..."));
    let result = pipelines
        .content
        .lookup(topic)
        .await
        .inspect_err(|err| info!(error = %err, topic, "topic lookup failed"));

    match RequestState::settle(result, TOPIC_FAILED) {
        RequestState::Ready(Some(info)) => {
            render::health_info(&info);
            if let Some(path) = html {
                std::fs::write(path, info.to_html())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                render::success(&format!("Article saved to {}", path.display()));
            }
        }
        RequestState::Ready(None) => {}
        state => return Err(anyhow!(state.error().unwrap_or(TOPIC_FAILED).to_string())),
    }
    Ok(())
}
