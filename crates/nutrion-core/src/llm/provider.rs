//! Model trait and request/response types.
//!
//! Defines the interface the hosted model client implements. The request
//! adapter only ever talks to a `&dyn GenerativeModel`, so tests can swap
//! in a stub.

use crate::error::{AnalysisError, UpstreamError};
use async_trait::async_trait;
use base64::Engine;

/// Binary image payload tagged with its mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
    /// Raw image bytes, never transformed
    pub data: Vec<u8>,
}

impl ImagePart {
    /// Base64 encoding of `data`, as inline payloads require.
    pub fn base64_data(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// One unit of a multimodal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Image(ImagePart),
}

/// Ordered request payload: instruction text, then at most one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    parts: Vec<Part>,
}

impl PromptRequest {
    /// Build a request from the instruction text and an optional image.
    ///
    /// A missing image simply yields a text-only request.
    pub fn new(prompt: &str, image: Option<ImagePart>) -> Result<Self, AnalysisError> {
        if prompt.trim().is_empty() {
            return Err(AnalysisError::EmptyPrompt);
        }

        let mut parts = vec![Part::Text(prompt.to_string())];
        if let Some(image) = image {
            if image.data.is_empty() {
                return Err(AnalysisError::InvalidImagePart);
            }
            parts.push(Part::Image(image));
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn has_image(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, Part::Image(_)))
    }
}

/// What the model returned for one request.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Generated text, `None` when the response carried no text at all
    pub text: Option<String>,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait implemented by hosted model clients.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the adapter takes `&dyn GenerativeModel`).
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Provider name for logging (e.g., "gemini").
    fn name(&self) -> &str;

    /// The configured model identifier.
    fn model_id(&self) -> &str;

    /// Send the request once and return the raw response.
    async fn generate(&self, request: &PromptRequest) -> Result<ModelResponse, UpstreamError>;
}
