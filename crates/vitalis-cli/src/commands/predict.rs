use anyhow::{Result, anyhow};
use clap::Args;
use tracing::info;
use vitalis_application::RequestState;
use vitalis_core::patient::{ActivityLevel, Sex};
use vitalis_core::prediction::AdHocInput;

use crate::app::App;
use crate::render;

pub const PREDICTION_FAILED: &str =
    "Failed to get a prediction from the AI. Please check your API key and try again.";

/// Predictor form. Defaults mirror the prefilled sample patient.
#[derive(Args)]
pub struct PredictArgs {
    #[arg(long, default_value_t = 45)]
    pub age: u32,
    #[arg(long, default_value_t = Sex::Male)]
    pub sex: Sex,
    #[arg(long, default_value_t = 170.0)]
    pub height: f64,
    #[arg(long, default_value_t = 82.0)]
    pub weight: f64,
    #[arg(long, default_value_t = 130.0)]
    pub systolic: f64,
    #[arg(long, default_value_t = 85.0)]
    pub diastolic: f64,
    /// Fasting glucose in mg/dL
    #[arg(long, default_value_t = 115.0)]
    pub glucose: f64,
    #[arg(long, default_value = "Prediabetes")]
    pub conditions: String,
    #[arg(long, default_value = "Diabetes")]
    pub family_history: String,
    #[arg(long, default_value = "Occasional fatigue, frequent thirst")]
    pub symptoms: String,
    #[arg(long, default_value_t = ActivityLevel::Low)]
    pub activity: ActivityLevel,
    #[arg(long)]
    pub smoker: bool,
    /// Pass `--alcohol false` for a non-drinker
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub alcohol: bool,
    #[arg(long, default_value = "Heavy rice-based dinners, frequent sweets")]
    pub food: String,
}

impl From<PredictArgs> for AdHocInput {
    fn from(args: PredictArgs) -> Self {
        Self {
            age: args.age,
            sex: args.sex,
            height_cm: args.height,
            weight_kg: args.weight,
            bp_systolic: args.systolic,
            bp_diastolic: args.diastolic,
            fasting_glucose: args.glucose,
            known_conditions: args.conditions,
            family_history: args.family_history,
            symptoms: args.symptoms,
            activity_level: args.activity,
            smoker: args.smoker,
            alcohol: args.alcohol,
            food_pattern_summary: args.food,
        }
    }
}

pub async fn run(app: &App, args: PredictArgs) -> Result<()> {
    app.require_session()?;
    let form = AdHocInput::from(args);

    let pipelines = app.pipelines().await?;
    render::hint("Predicting...");
    let result = pipelines
        .predictor
        .predict(&form)
        .await
        .inspect_err(|err| info!(error = %err, "prediction failed"));

    match RequestState::settle(result, PREDICTION_FAILED) {
        RequestState::Ready(prediction) => {
            render::prediction(&prediction);
            Ok(())
        }
        state => Err(anyhow!(state.error().unwrap_or(PREDICTION_FAILED).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PredictArgs,
    }

    #[test]
    fn test_defaults_match_prefilled_form() {
        let harness = Harness::try_parse_from(["predict"]).unwrap();
        assert_eq!(AdHocInput::from(harness.args), AdHocInput::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let harness = Harness::try_parse_from([
            "predict", "--age", "60", "--sex", "F", "--alcohol", "false", "--smoker",
        ])
        .unwrap();
        let form = AdHocInput::from(harness.args);
        assert_eq!(form.age, 60);
        assert_eq!(form.sex, Sex::Female);
        assert!(!form.alcohol);
        assert!(form.smoker);
    }
}
