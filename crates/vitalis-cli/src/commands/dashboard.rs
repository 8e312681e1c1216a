use anyhow::Result;
use vitalis_core::daily_log::vitals_series;
use vitalis_core::patient::PatientSummary;

use crate::app::App;
use crate::render;

pub fn show(app: &App) -> Result<()> {
    let context = app.require_session()?;
    let summary = PatientSummary::build(&context.patient, &context.daily_logs, app.session.today());

    render::profile(&summary);
    render::vitals(&vitals_series(&context.daily_logs));
    render::daily_logs(&context.daily_logs);
    render::hint("Run `vitalis analyze --text \"...\"` for an AI risk assessment.");
    Ok(())
}
