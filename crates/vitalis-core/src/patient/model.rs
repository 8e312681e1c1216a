//! Patient domain model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Biological sex as recorded on the profile.
///
/// Serialized as `M`, `F` or `Other` to stay readable by data written by
/// earlier versions of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Sex {
    #[serde(rename = "M")]
    #[strum(to_string = "M", serialize = "male")]
    Male,
    #[serde(rename = "F")]
    #[strum(to_string = "F", serialize = "female")]
    Female,
    #[serde(rename = "Other")]
    #[strum(to_string = "Other")]
    Other,
}

impl Sex {
    /// Short code used in prompts and exported reports.
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActivityLevel {
    Sedentary,
    Low,
    Moderate,
    Active,
}

impl ActivityLevel {
    /// Human readable label shown on the profile card.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Low => "Low Activity",
            ActivityLevel::Moderate => "Moderate Activity",
            ActivityLevel::Active => "Active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleFlags {
    pub smoker: bool,
    pub alcohol: bool,
    pub activity_level: ActivityLevel,
}

/// Identity and baseline health profile.
///
/// Created once at sign-up and never edited afterwards. Credentials are only
/// used for matching a local login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub name_alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub dob: NaiveDate,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(rename = "baseline_BMI")]
    pub baseline_bmi: f64,
    #[serde(default)]
    pub known_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub family_history: Vec<String>,
    pub lifestyle_flags: LifestyleFlags,
    #[serde(default)]
    pub food_pattern_summary: String,
}

impl Patient {
    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.dob, today)
    }

    /// Returns true when the given credentials match the stored ones exactly.
    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        self.username.as_deref() == Some(username) && self.password.as_deref() == Some(password)
    }
}

/// Calendar-year difference, reduced by one when the birthday has not yet
/// occurred in `today`'s year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Body-mass index rounded to one decimal place.
///
/// Returns `None` unless both measurements are positive.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !(height_cm > 0.0 && weight_kg > 0.0) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round1(weight_kg / (height_m * height_m)))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
