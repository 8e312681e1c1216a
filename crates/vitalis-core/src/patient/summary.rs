//! Read-only dashboard view of the active patient.

use chrono::NaiveDate;
use serde::Serialize;

use super::model::Patient;
use crate::daily_log::DailyLog;

/// Profile card data derived from the patient and their logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub patient_id: String,
    pub name_alias: String,
    pub age: i32,
    pub sex: &'static str,
    pub bmi: f64,
    pub activity: &'static str,
    pub smoker: bool,
    pub alcohol: bool,
    pub known_conditions: Vec<String>,
    pub medications: Vec<String>,
    pub family_history: Vec<String>,
    /// Distinct symptoms across all logs, in first-seen order.
    pub recent_symptoms: Vec<String>,
}

impl PatientSummary {
    pub fn build(patient: &Patient, logs: &[DailyLog], today: NaiveDate) -> Self {
        let mut recent_symptoms: Vec<String> = Vec::new();
        for symptom in logs.iter().flat_map(|log| log.symptoms.iter()) {
            if !recent_symptoms.contains(symptom) {
                recent_symptoms.push(symptom.clone());
            }
        }

        Self {
            patient_id: patient.patient_id.clone(),
            name_alias: patient.name_alias.clone(),
            age: patient.age_on(today),
            sex: patient.sex.code(),
            bmi: patient.baseline_bmi,
            activity: patient.lifestyle_flags.activity_level.label(),
            smoker: patient.lifestyle_flags.smoker,
            alcohol: patient.lifestyle_flags.alcohol,
            known_conditions: patient.known_conditions.clone(),
            medications: patient.medications.clone(),
            family_history: patient.family_history.clone(),
            recent_symptoms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily_log::seed_logs;
    use crate::patient::{ActivityLevel, SignUpInput, Sex};

    #[test]
    fn test_summary_dedupes_symptoms_in_order() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let patient = SignUpInput {
            username: "jane".into(),
            password: "pw".into(),
            name_alias: "Jane".into(),
            dob: NaiveDate::from_ymd_opt(1980, 12, 24).unwrap(),
            sex: Sex::Female,
            height_cm: 165.0,
            weight_kg: 60.0,
            known_conditions: String::new(),
            medications: String::new(),
            family_history: String::new(),
            smoker: false,
            alcohol: false,
            activity_level: ActivityLevel::Active,
            food_pattern_summary: String::new(),
        }
        .into_patient(1)
        .unwrap();

        let mut logs = seed_logs(&patient.patient_id, today);
        logs[1].symptoms = vec!["thirst".into(), "fatigue".into()];

        let summary = PatientSummary::build(&patient, &logs, today);
        assert_eq!(summary.age, 45);
        assert_eq!(summary.sex, "F");
        assert_eq!(summary.activity, "Active");
        assert_eq!(summary.recent_symptoms, vec!["fatigue", "thirst"]);
    }
}
