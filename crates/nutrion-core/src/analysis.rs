//! Request adapter: upload → image part → one model call → display text.

use crate::error::{AnalysisError, AnalysisResult, UpstreamError};
use crate::llm::{GenerativeModel, ImagePart, PromptRequest};
use crate::upload::Upload;

/// Returned when the model answers without any usable text.
pub const NO_TEXT_FALLBACK: &str = "No textual response returned by the model.";

/// Turn an upload into an image part.
///
/// `None` means no image was attached; the request will be text-only.
/// The mime type is the declared one when present, otherwise `image/png`
/// for `.png` filenames and `image/jpeg` for everything else.
pub fn prepare_image_part(upload: Option<&Upload>) -> AnalysisResult<Option<ImagePart>> {
    let Some(upload) = upload else {
        return Ok(None);
    };

    if upload.is_empty() {
        return Err(AnalysisError::EmptyUpload);
    }

    Ok(Some(ImagePart {
        mime_type: mime_type_for(upload),
        data: upload.bytes.clone(),
    }))
}

/// Mime type an upload will be sent with.
pub fn mime_type_for(upload: &Upload) -> String {
    match upload.declared_mime.as_deref().map(str::trim) {
        Some(declared) if !declared.is_empty() => declared.to_string(),
        _ => infer_mime(&upload.filename).to_string(),
    }
}

fn infer_mime(filename: &str) -> &'static str {
    if filename.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// Send the prompt (and image, if any) to the model and return its text.
///
/// No retry, no timeout, no caching: every call is one fresh request.
pub async fn get_model_response(
    model: &dyn GenerativeModel,
    prompt: &str,
    image_part: Option<ImagePart>,
) -> AnalysisResult<String> {
    let request = PromptRequest::new(prompt, image_part)?;

    match model.generate(&request).await {
        Ok(response) => {
            tracing::debug!(
                model = %response.model,
                tokens = ?response.tokens_used,
                latency_ms = response.latency_ms,
                "Model call succeeded"
            );
            Ok(display_text(response.text.as_deref()))
        }
        Err(err) => {
            tracing::warn!(provider = model.name(), "Model call failed: {err}");
            Err(classify_failure(err, model.model_id()))
        }
    }
}

fn display_text(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => NO_TEXT_FALLBACK.to_string(),
    }
}

/// Map a failed call onto the friendlier error kinds.
///
/// The structured `reason`/`status` fields are checked first. The message
/// substrings are a fallback: upstream wording is not a stable contract.
pub fn classify_failure(err: UpstreamError, model: &str) -> AnalysisError {
    if is_invalid_credential(&err) {
        AnalysisError::InvalidCredential { source: err }
    } else if is_model_unavailable(&err) {
        AnalysisError::ModelUnavailable {
            model: model.to_string(),
            source: err,
        }
    } else {
        AnalysisError::Upstream(err)
    }
}

fn is_invalid_credential(err: &UpstreamError) -> bool {
    err.reason.as_deref() == Some("API_KEY_INVALID")
        || err.message.contains("API key not valid")
        || err.message.contains("API_KEY_INVALID")
}

fn is_model_unavailable(err: &UpstreamError) -> bool {
    let lower = err.message.to_lowercase();
    let mentions_model = lower.contains("model");
    mentions_model && (lower.contains("not found") || err.status.as_deref() == Some("NOT_FOUND"))
}
