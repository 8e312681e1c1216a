//! Sign-up form input and patient construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{ActivityLevel, LifestyleFlags, Patient, Sex, bmi};
use crate::error::{Result, VitalisError};

/// Raw sign-up form. List fields are comma separated free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpInput {
    pub username: String,
    pub password: String,
    pub name_alias: String,
    pub dob: NaiveDate,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub known_conditions: String,
    pub medications: String,
    pub family_history: String,
    pub smoker: bool,
    pub alcohol: bool,
    pub activity_level: ActivityLevel,
    pub food_pattern_summary: String,
}

impl SignUpInput {
    /// Builds the immutable patient record.
    ///
    /// `created_at_millis` seeds the `user_<millis>` identifier.
    pub fn into_patient(self, created_at_millis: i64) -> Result<Patient> {
        if self.username.trim().is_empty() {
            return Err(VitalisError::validation("Username is required."));
        }
        if self.password.is_empty() {
            return Err(VitalisError::validation("Password is required."));
        }
        let baseline_bmi = bmi(self.height_cm, self.weight_kg).ok_or_else(|| {
            VitalisError::validation("Height and weight must both be greater than zero.")
        })?;

        Ok(Patient {
            patient_id: format!("user_{created_at_millis}"),
            name_alias: self.name_alias,
            username: Some(self.username),
            password: Some(self.password),
            dob: self.dob,
            sex: self.sex,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            baseline_bmi,
            known_conditions: split_list(&self.known_conditions),
            medications: split_list(&self.medications),
            family_history: split_list(&self.family_history),
            lifestyle_flags: LifestyleFlags {
                smoker: self.smoker,
                alcohol: self.alcohol,
                activity_level: self.activity_level,
            },
            food_pattern_summary: self.food_pattern_summary,
        })
    }
}

/// Splits comma separated text, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SignUpInput {
        SignUpInput {
            username: "johndoe".into(),
            password: "password123".into(),
            name_alias: "John Doe".into(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            sex: Sex::Male,
            height_cm: 180.0,
            weight_kg: 85.0,
            known_conditions: "Asthma, , Prediabetes ".into(),
            medications: "".into(),
            family_history: "Diabetes".into(),
            smoker: false,
            alcohol: true,
            activity_level: ActivityLevel::Moderate,
            food_pattern_summary: "Balanced diet".into(),
        }
    }

    #[test]
    fn test_into_patient_derives_fields() {
        let patient = input().into_patient(1_721_300_000_000).unwrap();
        assert_eq!(patient.patient_id, "user_1721300000000");
        assert_eq!(patient.baseline_bmi, 26.2);
        assert_eq!(patient.known_conditions, vec!["Asthma", "Prediabetes"]);
        assert!(patient.medications.is_empty());
        assert_eq!(patient.username.as_deref(), Some("johndoe"));
    }

    #[test]
    fn test_into_patient_rejects_zero_height() {
        let mut bad = input();
        bad.height_cm = 0.0;
        let err = bad.into_patient(1).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_into_patient_requires_username() {
        let mut bad = input();
        bad.username = "   ".into();
        assert!(bad.into_patient(1).unwrap_err().is_validation());
    }
}
