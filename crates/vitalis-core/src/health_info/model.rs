use serde::{Deserialize, Serialize};

use super::markdown::{Block, Inline, convert, render_html};
use crate::error::{Result, VitalisError};
use crate::prediction::strip_code_fence;

/// Appended whenever the service omits its own disclaimer.
pub const DEFAULT_DISCLAIMER: &str = "This information is for educational purposes only. Please consult a healthcare professional for medical advice.";

/// Quick-pick topics offered on the resources page.
pub const PREDEFINED_TOPICS: [&str; 6] = [
    "Type 2 Diabetes",
    "Hypertension",
    "Heart Disease",
    "Healthy Diet",
    "Benefits of Exercise",
    "Managing Stress",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInfoSection {
    pub title: String,
    /// Markdown body.
    pub content: String,
}

/// Educational article for one topic lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInfo {
    pub topic: String,
    pub sections: Vec<HealthInfoSection>,
    pub disclaimer: String,
}

impl HealthInfo {
    /// Renders the article as an HTML fragment: topic heading, one `<h2>`
    /// per section followed by its converted content, then the disclaimer.
    pub fn to_html(&self) -> String {
        let mut blocks = vec![heading(1, &self.topic)];
        for section in &self.sections {
            blocks.push(heading(2, &section.title));
            blocks.extend(convert(&section.content));
        }
        blocks.push(Block::Paragraph(vec![Inline::Text(self.disclaimer.clone())]));
        render_html(&blocks)
    }
}

fn heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        inlines: vec![Inline::Text(text.to_string())],
    }
}

#[derive(Deserialize)]
struct RawHealthInfo {
    topic: Option<String>,
    sections: Option<Vec<HealthInfoSection>>,
    disclaimer: Option<String>,
}

/// Decodes a content payload. `requested_topic` fills a missing topic.
pub fn decode_health_info(payload: &str, requested_topic: &str) -> Result<HealthInfo> {
    let raw: RawHealthInfo = serde_json::from_str(strip_code_fence(payload))
        .map_err(|e| VitalisError::parse(format!("health info payload is not valid JSON: {e}")))?;

    let sections = raw
        .sections
        .ok_or_else(|| VitalisError::parse("health info payload is missing `sections`"))?;

    let topic = raw
        .topic
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| requested_topic.to_string());

    let disclaimer = raw
        .disclaimer
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DISCLAIMER.to_string());

    Ok(HealthInfo {
        topic,
        sections,
        disclaimer,
    })
}
