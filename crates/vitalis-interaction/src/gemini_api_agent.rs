//! GeminiClient - direct REST implementation of the generation boundary.
//!
//! Structured requests set `responseMimeType: application/json` and pass the
//! schema through `generationConfig.responseSchema`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vitalis_core::config::ModelSettings;
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::generation::{ContentGenerator, GenerationRequest, PromptPart};
use vitalis_core::secret::SecretService;

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Builds a client from model settings. The request timeout comes from
    /// `settings.timeout_secs`.
    pub fn new(api_key: impl Into<String>, settings: &ModelSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| VitalisError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: settings.name.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Loads the API key from the secret service. A model name in
    /// `secret.json` takes precedence over `settings.name`.
    pub async fn from_secrets(secrets: &dyn SecretService, settings: &ModelSettings) -> Result<Self> {
        let api_key = secrets.require_api_key().await?;
        let client = Self::new(api_key, settings)?;
        match secrets.load_secrets().await?.model_override() {
            Some(model) if !model.trim().is_empty() => Ok(client.with_model(model)),
            _ => Ok(client),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // reqwest errors may carry the URL, which includes the key
                let err = err.without_url();
                VitalisError::service(
                    None,
                    format!("Gemini API request failed: {err}"),
                    err.is_connect() || err.is_timeout(),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            warn!(status = status.as_u16(), model = %self.model, "Gemini API returned an error");
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| VitalisError::parse(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let body = GenerateContentRequest::from_request(request)?;
        debug!(
            model = %self.model,
            parts = body.contents.first().map_or(0, |c| c.parts.len()),
            structured = body.generation_config.is_some(),
            "sending generateContent"
        );
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn from_request(request: GenerationRequest) -> Result<Self> {
        let parts: Vec<Part> = request
            .parts
            .into_iter()
            .filter_map(|part| match part {
                PromptPart::Text(text) if text.trim().is_empty() => None,
                PromptPart::Text(text) => Some(Part::Text { text }),
                PromptPart::InlineData { mime_type, data } => Some(Part::InlineData {
                    inline_data: InlineDataPayload { mime_type, data },
                }),
            })
            .collect();

        if parts.is_empty() {
            return Err(VitalisError::validation(
                "Gemini payload must include text or an attachment",
            ));
        }

        let generation_config = request.response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });

        Ok(Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config,
        })
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(VitalisError::parse(
            "Gemini API returned no text in the response candidates",
        ));
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> VitalisError {
    let mut message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    if let Some(delay) = retry_after {
        message.push_str(&format!(" (retry after {}s)", delay.as_secs()));
    }

    VitalisError::service(Some(status.as_u16()), message, is_retryable)
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
