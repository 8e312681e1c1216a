//! Daily observation logs.

pub mod model;
pub mod series;

pub use model::{DailyLog, Meal, MealItem, MealType, Vitals, normalize_recent_dates, seed_logs};
pub use series::{VitalsPoint, vitals_series};
