//! Google Gemini API integration.
//!
//! Implements [`GenerationClient`] on top of the `generateContent` endpoint
//! with a JSON response schema.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{AIError, GenerationClient, GenerationRequest, RequestPart};
use crate::core::AiConfig;
use crate::security::SecretValue;

/// Gemini API provider.
pub struct GeminiProvider {
    client: Client,
    api_key: SecretValue,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider from the AI config section and an API key.
    pub fn new(config: &AiConfig, api_key: SecretValue) -> anyhow::Result<Self> {
        if api_key.is_blank() {
            return Err(AIError::MissingApiKey.into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create with a specific base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Model used for requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint for `generateContent` on the configured model.
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the wire request.
    fn build_request(request: &GenerationRequest) -> GeminiRequest<'_> {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                RequestPart::Text(text) => Part::Text { text },
                RequestPart::InlineData { mime_type, data } => {
                    Part::InlineData { inline_data: InlineData { mime_type, data } }
                }
            })
            .collect();

        GeminiRequest {
            contents: vec![Content { role: "user", parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        }
    }

    /// Map a non-success status to an error.
    fn map_api_error(status: StatusCode, body: &str) -> AIError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());

        if status == StatusCode::TOO_MANY_REQUESTS {
            AIError::RateLimited(message)
        } else {
            AIError::ApiError { status: status.as_u16(), message }
        }
    }

    /// Concatenated text of the first candidate.
    fn extract_text(response: GeminiResponse) -> Result<String, AIError> {
        let candidate = response.candidates.into_iter().next();

        let Some(candidate) = candidate else {
            return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => AIError::Blocked(reason),
                None => AIError::NoResponse,
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(match candidate.finish_reason {
                Some(reason) if reason != "STOP" => AIError::Blocked(reason),
                _ => AIError::NoResponse,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl GenerationClient for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let body = Self::build_request(request);

        tracing::debug!(model = %self.model, operation = request.operation, "Calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| AIError::Request(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| AIError::Request(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = %status, operation = request.operation, "Gemini API error");
            return Err(Self::map_api_error(status, &text).into());
        }

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            AIError::InvalidResponse { operation: request.operation, message: e.to_string() }
        })?;

        Ok(Self::extract_text(parsed)?)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Gemini API request structure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

/// Content block in a Gemini request.
#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

/// Request part: text or inline data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
}

/// Gemini API response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ImagePayload;
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(&AiConfig::default(), SecretValue::new("test-key")).unwrap()
    }

    #[test]
    fn test_creation_fails_without_key() {
        let result = GeminiProvider::new(&AiConfig::default(), SecretValue::new(""));
        let err = result.err().unwrap();
        assert!(matches!(err.downcast_ref::<AIError>(), Some(AIError::MissingApiKey)));
    }

    #[test]
    fn test_endpoint() {
        let provider = provider().with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(provider.with_model("gemini-2.5-flash").model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_request_serialization() {
        let image = ImagePayload::from_bytes(b"img", "image/jpeg");
        let request = GenerationRequest::with_image(
            "studio analysis",
            &image,
            "Analyze",
            json!({"type": "OBJECT"}),
        );

        let body = serde_json::to_value(GeminiProvider::build_request(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inlineData": {"mimeType": "image/jpeg", "data": "aW1n"}},
                        {"text": "Analyze"}
                    ]
                }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "[{\"a\":"}, {"text": "1}]"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(GeminiProvider::extract_text(response).unwrap(), "[{\"a\":1}]");
    }

    #[test]
    fn test_extract_text_blocked() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(
            GeminiProvider::extract_text(response),
            Err(AIError::Blocked(reason)) if reason == "SAFETY"
        ));

        let empty: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(matches!(GeminiProvider::extract_text(empty), Err(AIError::NoResponse)));
    }

    #[test]
    fn test_map_api_error() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err = GeminiProvider::map_api_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(
            err,
            AIError::ApiError { status: 400, ref message } if message == "API key not valid"
        ));

        let err = GeminiProvider::map_api_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, AIError::RateLimited(ref m) if m == "slow down"));
    }
}
