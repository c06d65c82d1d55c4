//! Generation service integration.
//!
//! Turns studios, cycles and session slots into structured generation
//! requests and reconciles the returned JSON into workspace state.
//!
//! ## Features
//!
//! - Studio analysis from a photo (vision)
//! - Macrocycle periodization planning
//! - Per-studio session workouts with equipment constraints

#[cfg(feature = "ai")]
mod gemini;
mod media;
mod planner;
mod prompts;
mod schema;

#[cfg(feature = "ai")]
pub use gemini::GeminiProvider;
pub use media::ImagePayload;
pub use planner::{Planner, SessionOutcome, StudioAnalysis};
pub use prompts::{macrocycle_prompt, session_prompt, studio_analysis_prompt, SessionPromptInput};
pub use schema::{macrocycle_schema, session_schema, studio_analysis_schema};

use async_trait::async_trait;

/// One part of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    /// Plain prompt text
    Text(String),
    /// Base64-encoded binary data (images)
    InlineData { mime_type: String, data: String },
}

/// A structured prompt plus the schema the response must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Short label used in logs (e.g. "macrocycle")
    pub operation: &'static str,
    /// Prompt parts, in order
    pub parts: Vec<RequestPart>,
    /// Response schema in the service's OpenAPI subset
    pub response_schema: serde_json::Value,
}

impl GenerationRequest {
    /// Create a text-only request.
    pub fn text(
        operation: &'static str,
        prompt: impl Into<String>,
        response_schema: serde_json::Value,
    ) -> Self {
        Self { operation, parts: vec![RequestPart::Text(prompt.into())], response_schema }
    }

    /// Create a request with an image followed by a text prompt.
    pub fn with_image(
        operation: &'static str,
        image: &ImagePayload,
        prompt: impl Into<String>,
        response_schema: serde_json::Value,
    ) -> Self {
        Self {
            operation,
            parts: vec![
                RequestPart::InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
                RequestPart::Text(prompt.into()),
            ],
            response_schema,
        }
    }

    /// Concatenated text parts of the request.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                RequestPart::Text(text) => Some(text.as_str()),
                RequestPart::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for generation services.
///
/// Given a structured prompt and a response schema, return JSON text
/// conforming to that schema, or fail.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Run a single generation request and return the raw JSON text.
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// AI error types.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("API Key is missing - set GEMINI_API_KEY or run `studiocycle key set`")]
    MissingApiKey,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request blocked by the service: {0}")]
    Blocked(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("No response from AI")]
    NoResponse,

    #[error("Invalid {operation} response: {message}")]
    InvalidResponse { operation: &'static str, message: String },
}
