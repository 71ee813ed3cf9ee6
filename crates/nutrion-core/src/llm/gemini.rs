//! Gemini provider using the `generateContent` REST API.
//!
//! Text goes in as a `text` part, the image as an `inlineData` part with
//! base64 bytes. Non-2xx responses are decoded from Google's JSON error
//! envelope so callers can inspect the status and reason codes.

use super::provider::{GenerativeModel, ModelResponse, Part, PromptRequest};
use crate::config::Settings;
use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini provider. Holds one HTTP client for the process lifetime.
pub struct GeminiProvider {
    api_key: String,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key().to_string(),
            model: settings.model().to_string(),
            endpoint: settings.endpoint().to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateRequest {
    fn from_prompt(request: &PromptRequest) -> Self {
        let parts = request
            .parts()
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text: text.clone() },
                Part::Image(image) => WirePart::Inline {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.base64_data(),
                    },
                },
            })
            .collect();

        Self {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        }
    }
}

// --- Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u32>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, `None` if it has no text parts.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

// --- Error envelope ---

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

/// Decode a non-2xx response body into an [`UpstreamError`].
///
/// Bodies that aren't Google's error envelope keep the raw text.
pub(crate) fn parse_error_body(status_code: u16, body: &str) -> UpstreamError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => UpstreamError {
            message: envelope.error.message,
            status_code: Some(status_code),
            status: envelope.error.status,
            reason: envelope.error.details.into_iter().find_map(|d| d.reason),
        },
        Err(_) => UpstreamError {
            message: format!("Gemini HTTP {status_code}: {}", body.trim()),
            status_code: Some(status_code),
            status: None,
            reason: None,
        },
    }
}

/// Transport failures, with the request URL dropped: it names `/models/...`
/// and must not leak into the text the failure is classified by.
fn transport_error(err: reqwest::Error) -> UpstreamError {
    UpstreamError::message(format!("Gemini request failed: {}", err.without_url()))
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &PromptRequest) -> Result<ModelResponse, UpstreamError> {
        let start = Instant::now();
        let body = GenerateRequest::from_prompt(request);

        tracing::debug!(
            model = %self.model,
            parts = request.parts().len(),
            has_image = request.has_image(),
            "Sending generateContent request"
        );

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = parse_error_body(status.as_u16(), &text);
            tracing::debug!(
                status = status.as_u16(),
                reason = err.reason.as_deref().unwrap_or("-"),
                "Gemini returned an error"
            );
            return Err(err);
        }

        let generated: GenerateResponse = resp.json().await.map_err(|e| {
            UpstreamError::message(format!("Failed to parse Gemini response: {e}"))
        })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::info!(model = %self.model, latency_ms, "Gemini responded");

        Ok(ModelResponse {
            text: generated.text(),
            model: generated
                .model_version
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            tokens_used: generated
                .usage_metadata
                .as_ref()
                .and_then(|u| u.total_token_count),
            latency_ms,
        })
    }
}
