//! Response schema descriptors sent with structured generation requests.
//!
//! Schemas use the OpenAPI subset understood by the Gemini API
//! (`OBJECT`, `STRING`, `NUMBER`, `ARRAY`, string enums). The decoders in
//! [`crate::prediction`] and [`crate::health_info`] still validate the
//! payload, since the service may not honor the schema.

use serde_json::{Value, json};

/// Schema for [`crate::prediction::PredictionResult`].
pub fn prediction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "disease": {
                "type": "STRING",
                "description": "The primary disease or health concern identified from the analysis."
            },
            "riskProbability": {
                "type": "NUMBER",
                "description": "A numerical probability/confidence score from 0.0 to 1.0."
            },
            "riskLabel": {
                "type": "STRING",
                "enum": ["Low", "Medium", "High"],
                "description": "A label: 'Low', 'Medium', or 'High' risk/concern."
            },
            "topContributors": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "The top 3-4 factors contributing to the finding, based on the provided documents and data."
            },
            "recommendations": {
                "type": "ARRAY",
                "minItems": 3,
                "maxItems": 3,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "category": {
                            "type": "STRING",
                            "enum": ["Diet", "Lifestyle", "Monitoring"]
                        }
                    },
                    "required": ["title", "description", "category"]
                },
                "description": "Exactly three personalized, actionable recommendations."
            }
        },
        "required": ["disease", "riskProbability", "riskLabel", "topContributors", "recommendations"]
    })
}

/// Schema for [`crate::health_info::HealthInfo`].
pub fn health_info_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING" },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "content": {
                            "type": "STRING",
                            "description": "Section body formatted as simple Markdown: '#' headers, '* ' bullet lines and **bold** text."
                        }
                    },
                    "required": ["title", "content"]
                }
            },
            "disclaimer": { "type": "STRING" }
        },
        "required": ["topic", "sections", "disclaimer"]
    })
}
