//! Boundary to the external generation service.
//!
//! Pipelines build a [`GenerationRequest`] and hand it to a
//! [`ContentGenerator`]; the concrete HTTP client lives in the interaction
//! crate so the domain never depends on a transport.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A single prompt segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PromptPart {
    Text(String),
    /// Base64 encoded bytes tagged with their media type.
    InlineData { mime_type: String, data: String },
}

/// One request to the generation service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub parts: Vec<PromptPart>,
    /// When set, the service is asked for JSON matching this schema.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![PromptPart::Text(prompt.into())],
            response_schema: None,
        }
    }

    pub fn with_part(mut self, part: PromptPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// A file picked by the user for analysis.
///
/// The declared media type is trusted as-is; contents are not sniffed.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Encodes the bytes as an inline prompt part.
    pub fn to_inline_part(&self) -> PromptPart {
        PromptPart::InlineData {
            mime_type: self.mime_type.clone(),
            data: BASE64_STANDARD.encode(&self.bytes),
        }
    }
}

/// Sends prompts to a large-language-model service.
///
/// Implementations return the raw response text. For structured requests
/// that text is expected to be JSON, but callers must validate it.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}
