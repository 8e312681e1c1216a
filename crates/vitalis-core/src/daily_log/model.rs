//! Daily observation log.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub food_name: String,
    pub qty: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub meal_type: MealType,
    #[serde(default)]
    pub items: Vec<MealItem>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub fasting_glucose: f64,
    pub heart_rate: f64,
}

/// One day of observations for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub log_id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: Vec<Meal>,
    pub vitals: Vitals,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub sleep_hours: f64,
}

/// The two starter entries written at sign-up, dated yesterday and today.
pub fn seed_logs(patient_id: &str, today: NaiveDate) -> Vec<DailyLog> {
    vec![
        DailyLog {
            log_id: "L01".to_string(),
            patient_id: patient_id.to_string(),
            date: today - Duration::days(1),
            meals: Vec::new(),
            vitals: Vitals {
                bp_systolic: 129.0,
                bp_diastolic: 83.0,
                fasting_glucose: 118.0,
                heart_rate: 79.0,
            },
            symptoms: vec!["fatigue".to_string()],
            sleep_hours: 5.5,
        },
        DailyLog {
            log_id: "L02".to_string(),
            patient_id: patient_id.to_string(),
            date: today,
            meals: Vec::new(),
            vitals: Vitals {
                bp_systolic: 127.0,
                bp_diastolic: 82.0,
                fasting_glucose: 114.0,
                heart_rate: 77.0,
            },
            symptoms: Vec::new(),
            sleep_hours: 7.5,
        },
    ]
}

/// Moves the two chronologically latest logs onto yesterday and today.
///
/// Logs are stably sorted by date first; earlier entries keep their dates.
/// Running this twice on the same day yields the same dates, but historical
/// dates of the two latest entries are overwritten every time.
pub fn normalize_recent_dates(logs: &mut [DailyLog], today: NaiveDate) {
    logs.sort_by_key(|log| log.date);
    let len = logs.len();
    if let Some(last) = logs.last_mut() {
        last.date = today;
    }
    if len >= 2 {
        logs[len - 2].date = today - Duration::days(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(id: &str, date: NaiveDate) -> DailyLog {
        DailyLog {
            log_id: id.to_string(),
            patient_id: "user_1".to_string(),
            date,
            meals: Vec::new(),
            vitals: Vitals {
                bp_systolic: 120.0,
                bp_diastolic: 80.0,
                fasting_glucose: 100.0,
                heart_rate: 70.0,
            },
            symptoms: Vec::new(),
            sleep_hours: 7.0,
        }
    }

    #[test]
    fn test_seed_logs_are_yesterday_and_today() {
        let today = date(2026, 3, 1);
        let logs = seed_logs("user_42", today);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].date, date(2026, 2, 28));
        assert_eq!(logs[1].date, today);
        assert!(logs.iter().all(|l| l.patient_id == "user_42"));
        assert_eq!(logs[0].symptoms, vec!["fatigue"]);
    }

    #[test]
    fn test_normalize_moves_latest_two_only() {
        let today = date(2026, 10, 18);
        let mut logs = vec![
            log("L03", date(2024, 7, 19)),
            log("L01", date(2024, 7, 10)),
            log("L02", date(2024, 7, 18)),
        ];
        normalize_recent_dates(&mut logs, today);

        assert_eq!(logs[0].log_id, "L01");
        assert_eq!(logs[0].date, date(2024, 7, 10));
        assert_eq!(logs[1].log_id, "L02");
        assert_eq!(logs[1].date, date(2026, 10, 17));
        assert_eq!(logs[2].log_id, "L03");
        assert_eq!(logs[2].date, today);
    }

    #[test]
    fn test_normalize_single_and_empty() {
        let today = date(2026, 10, 18);
        let mut single = vec![log("L01", date(2020, 1, 1))];
        normalize_recent_dates(&mut single, today);
        assert_eq!(single[0].date, today);

        let mut empty: Vec<DailyLog> = Vec::new();
        normalize_recent_dates(&mut empty, today);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_normalize_same_day_is_stable() {
        let today = date(2026, 10, 18);
        let mut logs = seed_logs("user_1", date(2024, 7, 19));
        normalize_recent_dates(&mut logs, today);
        let first = logs.clone();
        normalize_recent_dates(&mut logs, today);
        assert_eq!(first, logs);
    }
}
