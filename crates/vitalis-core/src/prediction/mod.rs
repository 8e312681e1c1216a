//! Disease-risk prediction results and inputs.

pub mod adhoc;
pub mod model;

pub use adhoc::AdHocInput;
pub use model::{
    PredictionResult, Recommendation, RecommendationCategory, RiskLabel, decode_prediction,
    strip_code_fence,
};
