//! Patient profile domain.

pub mod model;
pub mod signup;
pub mod summary;

pub use model::{ActivityLevel, LifestyleFlags, Patient, Sex, age_on, bmi};
pub use signup::{SignUpInput, split_list};
pub use summary::PatientSummary;
