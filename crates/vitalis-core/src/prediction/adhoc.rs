//! Manually entered data for the stateless ad-hoc predictor.

use serde::{Deserialize, Serialize};

use crate::patient::{ActivityLevel, Sex, bmi};

/// Flat predictor form. No stored profile or attachment is involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdHocInput {
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub fasting_glucose: f64,
    pub known_conditions: String,
    pub family_history: String,
    pub symptoms: String,
    pub activity_level: ActivityLevel,
    pub smoker: bool,
    pub alcohol: bool,
    pub food_pattern_summary: String,
}

impl AdHocInput {
    /// BMI for prompt context only; `None` when height or weight is not positive.
    pub fn bmi(&self) -> Option<f64> {
        bmi(self.height_cm, self.weight_kg)
    }
}

/// The predictor form's prefilled values.
impl Default for AdHocInput {
    fn default() -> Self {
        Self {
            age: 45,
            sex: Sex::Male,
            height_cm: 170.0,
            weight_kg: 82.0,
            bp_systolic: 130.0,
            bp_diastolic: 85.0,
            fasting_glucose: 115.0,
            known_conditions: "Prediabetes".to_string(),
            family_history: "Diabetes".to_string(),
            symptoms: "Occasional fatigue, frequent thirst".to_string(),
            activity_level: ActivityLevel::Low,
            smoker: false,
            alcohol: true,
            food_pattern_summary: "Heavy rice-based dinners, frequent sweets".to_string(),
        }
    }
}
