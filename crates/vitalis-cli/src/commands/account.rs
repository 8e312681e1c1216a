use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use vitalis_core::patient::{ActivityLevel, Sex, SignUpInput};
use vitalis_core::session::Credentials;

use super::prompt;
use crate::app::App;
use crate::render;

#[derive(Args)]
pub struct SignUpArgs {
    #[arg(long)]
    pub username: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
    /// Display name
    #[arg(long)]
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, default_value = "1990-01-01")]
    pub dob: NaiveDate,
    /// M, F or Other
    #[arg(long, default_value_t = Sex::Male)]
    pub sex: Sex,
    /// Height in centimetres
    #[arg(long)]
    pub height: f64,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: f64,
    /// Comma-separated list
    #[arg(long, default_value = "")]
    pub conditions: String,
    /// Comma-separated list
    #[arg(long, default_value = "")]
    pub medications: String,
    /// Comma-separated list
    #[arg(long, default_value = "")]
    pub family_history: String,
    #[arg(long)]
    pub smoker: bool,
    #[arg(long)]
    pub alcohol: bool,
    /// sedentary, low, moderate or active
    #[arg(long, default_value_t = ActivityLevel::Moderate)]
    pub activity: ActivityLevel,
    /// Short description of typical meals
    #[arg(long, default_value = "")]
    pub food: String,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

pub fn sign_up(app: &mut App, args: SignUpArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    let input = SignUpInput {
        username: args.username,
        password,
        name_alias: args.name,
        dob: args.dob,
        sex: args.sex,
        height_cm: args.height,
        weight_kg: args.weight,
        known_conditions: args.conditions,
        medications: args.medications,
        family_history: args.family_history,
        smoker: args.smoker,
        alcohol: args.alcohol,
        activity_level: args.activity,
        food_pattern_summary: args.food,
    };

    app.session.show_sign_up();
    let patient = app.session.sign_up(input)?;

    render::success(&format!("Account created for {}.", patient.name_alias));
    render::hint("Run `vitalis login` to continue.");
    Ok(())
}

pub fn log_in(app: &mut App, args: LoginArgs) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    app.session.show_login();
    let context = app.session.log_in(&Credentials::new(username, password))?;

    render::success(&format!("Welcome back, {}!", context.patient.name_alias));
    Ok(())
}

pub fn log_out(app: &mut App) -> Result<()> {
    if !app.session.state().is_logged_in() {
        render::hint("Already logged out.");
        return Ok(());
    }
    app.session.log_out()?;
    render::success("Logged out.");
    Ok(())
}
