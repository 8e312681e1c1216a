//! Prediction results returned by the analysis pipelines.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, VitalisError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum RecommendationCategory {
    Diet,
    Lifestyle,
    Monitoring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub category: RecommendationCategory,
}

/// Outcome of a risk analysis. Held in memory only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub disease: String,
    pub risk_probability: f64,
    pub risk_label: RiskLabel,
    pub top_contributors: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl PredictionResult {
    /// Number of recommendations the response schema asks for.
    pub const EXPECTED_RECOMMENDATIONS: usize = 3;

    /// Probability as a whole percentage for display.
    pub fn risk_percent(&self) -> u32 {
        (self.risk_probability * 100.0).round() as u32
    }
}

/// Wire shape before required-field validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrediction {
    disease: Option<String>,
    #[serde(default)]
    risk_probability: Option<f64>,
    risk_label: Option<RiskLabel>,
    #[serde(default)]
    top_contributors: Vec<String>,
    recommendations: Option<Vec<Recommendation>>,
}

/// Decodes a schema-constrained prediction payload.
///
/// `disease`, `riskLabel` and `recommendations` must be present and
/// non-empty; anything else falls back to a neutral value.
pub fn decode_prediction(payload: &str) -> Result<PredictionResult> {
    let body = strip_code_fence(payload);
    let raw: RawPrediction = serde_json::from_str(body)
        .map_err(|e| VitalisError::parse(format!("prediction payload is not valid JSON: {e}")))?;

    let disease = raw
        .disease
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| VitalisError::parse("prediction payload is missing `disease`"))?;
    let risk_label = raw
        .risk_label
        .ok_or_else(|| VitalisError::parse("prediction payload is missing `riskLabel`"))?;
    let recommendations = raw
        .recommendations
        .ok_or_else(|| VitalisError::parse("prediction payload is missing `recommendations`"))?;

    if recommendations.len() != PredictionResult::EXPECTED_RECOMMENDATIONS {
        tracing::warn!(
            count = recommendations.len(),
            "prediction returned an unexpected number of recommendations"
        );
    }

    let risk_probability = raw
        .risk_probability
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    Ok(PredictionResult {
        disease,
        risk_probability,
        risk_label,
        top_contributors: raw.top_contributors,
        recommendations,
    })
}

/// Removes a surrounding Markdown code fence, if the model added one.
pub fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "disease": "Type 2 Diabetes",
        "riskProbability": 0.72,
        "riskLabel": "High",
        "topContributors": ["Elevated fasting glucose", "Family history", "Low activity"],
        "recommendations": [
            {"title": "Cut sugary drinks", "description": "Replace with water.", "category": "Diet"},
            {"title": "Walk daily", "description": "30 minutes brisk walking.", "category": "Lifestyle"},
            {"title": "Check HbA1c", "description": "Every 3 months.", "category": "Monitoring"}
        ]
    }"#;

    #[test]
    fn test_decode_valid_payload() {
        let result = decode_prediction(VALID).unwrap();
        assert_eq!(result.disease, "Type 2 Diabetes");
        assert_eq!(result.risk_label, RiskLabel::High);
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.recommendations[2].category, RecommendationCategory::Monitoring);
        assert_eq!(result.risk_percent(), 72);
    }

    #[test]
    fn test_decode_fenced_payload() {
        let fenced = format!("```json\n{VALID}\n```");
        assert!(decode_prediction(&fenced).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let payload = r#"{"disease": "Hypertension", "riskProbability": 0.4, "recommendations": []}"#;
        let err = decode_prediction(payload).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("riskLabel"));
    }

    #[test]
    fn test_not_json_is_parse_error() {
        assert!(decode_prediction("I cannot help with that").unwrap_err().is_parse());
    }

    #[test]
    fn test_unknown_label_is_parse_error() {
        let payload = r#"{"disease": "X", "riskLabel": "Moderate", "recommendations": []}"#;
        assert!(decode_prediction(payload).unwrap_err().is_parse());
    }

    #[test]
    fn test_probability_is_clamped_and_defaulted() {
        let over = r#"{"disease": "X", "riskProbability": 1.7, "riskLabel": "Low", "recommendations": []}"#;
        assert_eq!(decode_prediction(over).unwrap().risk_probability, 1.0);

        let missing = r#"{"disease": "X", "riskLabel": "Low", "recommendations": []}"#;
        let result = decode_prediction(missing).unwrap();
        assert_eq!(result.risk_probability, 0.0);
        assert!(result.top_contributors.is_empty());
    }
}
