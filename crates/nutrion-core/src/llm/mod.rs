//! Hosted model integration.
//!
//! A small provider abstraction (`GenerativeModel`) plus the Gemini client
//! that implements it.

pub(crate) mod gemini;
pub(crate) mod provider;

pub use gemini::GeminiProvider;
pub use provider::{GenerativeModel, ImagePart, ModelResponse, Part, PromptRequest};
