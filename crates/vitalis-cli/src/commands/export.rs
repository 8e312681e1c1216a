use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use vitalis_core::report::{export_csv, report_file_name};

use crate::app::App;
use crate::render;

pub fn run(app: &App, output: Option<PathBuf>) -> Result<()> {
    let context = app.require_session()?;
    let path = output.unwrap_or_else(|| PathBuf::from(report_file_name(&context.patient)));

    let csv = export_csv(&context.patient, &context.daily_logs, app.session.today());
    std::fs::write(&path, csv)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), rows = context.daily_logs.len(), "report exported");
    render::success(&format!("Report saved to {}", path.display()));
    Ok(())
}
