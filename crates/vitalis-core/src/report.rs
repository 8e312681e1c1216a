//! Downloadable CSV health report.

use chrono::NaiveDate;

use crate::daily_log::DailyLog;
use crate::patient::Patient;

const HEADER: [&str; 13] = [
    "patient_id",
    "name_alias",
    "age",
    "sex",
    "baseline_BMI",
    "log_id",
    "date",
    "bp_systolic",
    "bp_diastolic",
    "fasting_glucose",
    "heart_rate",
    "sleep_hours",
    "symptoms",
];

/// Suggested file name for a patient's exported report.
pub fn report_file_name(patient: &Patient) -> String {
    format!("health_report_{}.csv", patient.patient_id)
}

/// Renders one header row and one row per log, in the order given.
///
/// Symptoms are joined with `;`. Any field holding a comma, quote or line
/// break is quoted with inner quotes doubled.
pub fn export_csv(patient: &Patient, logs: &[DailyLog], today: NaiveDate) -> String {
    let age = patient.age_on(today).to_string();
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|h| h.to_string()));

    for log in logs {
        push_row(
            &mut out,
            [
                patient.patient_id.clone(),
                patient.name_alias.clone(),
                age.clone(),
                patient.sex.code().to_string(),
                patient.baseline_bmi.to_string(),
                log.log_id.clone(),
                log.date.format("%Y-%m-%d").to_string(),
                log.vitals.bp_systolic.to_string(),
                log.vitals.bp_diastolic.to_string(),
                log.vitals.fasting_glucose.to_string(),
                log.vitals.heart_rate.to_string(),
                log.sleep_hours.to_string(),
                log.symptoms.join(";"),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let row = fields
        .into_iter()
        .map(|field| quote_field(&field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push('\n');
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily_log::seed_logs;
    use crate::patient::{ActivityLevel, LifestyleFlags, Sex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn patient() -> Patient {
        Patient {
            patient_id: "user_1700000000000".into(),
            name_alias: "John Doe".into(),
            username: Some("johndoe".into()),
            password: Some("secret".into()),
            dob: date(1990, 1, 1),
            sex: Sex::Male,
            height_cm: 180.0,
            weight_kg: 85.0,
            baseline_bmi: 26.2,
            known_conditions: Vec::new(),
            medications: Vec::new(),
            family_history: Vec::new(),
            lifestyle_flags: LifestyleFlags {
                smoker: false,
                alcohol: true,
                activity_level: ActivityLevel::Moderate,
            },
            food_pattern_summary: String::new(),
        }
    }

    #[test]
    fn test_header_and_one_row_per_log() {
        let today = date(2026, 10, 18);
        let p = patient();
        let csv = export_csv(&p, &seed_logs(&p.patient_id, today), today);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("patient_id,name_alias,age,sex,baseline_BMI,log_id,date"));
        assert_eq!(
            lines[1],
            "user_1700000000000,John Doe,36,M,26.2,L01,2026-10-17,129,83,118,79,5.5,fatigue"
        );
        assert!(!csv.contains("secret"));
    }

    #[test]
    fn test_symptoms_with_comma_are_quoted() {
        let today = date(2026, 10, 18);
        let p = patient();
        let mut logs = seed_logs(&p.patient_id, today);
        logs[1].symptoms = vec!["fatigue, mild".into(), "thirst".into()];

        let csv = export_csv(&p, &logs, today);
        let row = csv.lines().nth(2).unwrap();
        assert!(row.ends_with(",\"fatigue, mild;thirst\""), "row was {row}");
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(quote_field(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(quote_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(quote_field("plain"), "plain");
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(&patient()), "health_report_user_1700000000000.csv");
    }
}
