use chrono::NaiveDate;
use serde::Serialize;

use super::model::DailyLog;

/// A single chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VitalsPoint {
    pub date: NaiveDate,
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub fasting_glucose: f64,
}

/// Vitals trend ordered by date, oldest first.
pub fn vitals_series(logs: &[DailyLog]) -> Vec<VitalsPoint> {
    let mut points: Vec<VitalsPoint> = logs
        .iter()
        .map(|log| VitalsPoint {
            date: log.date,
            bp_systolic: log.vitals.bp_systolic,
            bp_diastolic: log.vitals.bp_diastolic,
            fasting_glucose: log.vitals.fasting_glucose,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
