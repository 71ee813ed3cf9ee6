//! Error types for Nutrion.
//!
//! Startup problems are `ConfigError`s and stop the process. Everything that
//! can go wrong while analyzing one photo is an `AnalysisError`, which the
//! front end renders as a message and then carries on.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Neither the config file nor the environment provides an API key
    #[error(
        "Missing API key. Create a .env file with GOOGLE_API_KEY=your_key (or API_KEY=your_key)."
    )]
    MissingCredential,
}

/// Errors raised while turning one upload into one model response.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The uploaded bytes were empty or could not be read
    #[error("Uploaded file is empty or unreadable.")]
    EmptyUpload,

    /// An image part reached the request builder without any data
    #[error("image part must carry a mime type and non-empty data")]
    InvalidImagePart,

    /// The instruction text was blank
    #[error("prompt text must not be empty")]
    EmptyPrompt,

    /// The API rejected the credential
    #[error(
        "API key invalid. Re-check the key in your .env or generate a new one in Google AI Studio."
    )]
    InvalidCredential {
        #[source]
        source: UpstreamError,
    },

    /// The configured model is not served to this credential
    #[error(
        "Model {model} may not be available to your key. List the models your key can use and set gemini.model accordingly."
    )]
    ModelUnavailable {
        model: String,
        #[source]
        source: UpstreamError,
    },

    /// Any other failure from the model call, passed through untouched
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// A failed call to the hosted model.
///
/// `message` is whatever the API (or the transport) said. The structured
/// fields are filled in when the API returned its JSON error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UpstreamError {
    /// Human-readable error text
    pub message: String,
    /// HTTP status, `None` for transport failures
    pub status_code: Option<u16>,
    /// Canonical status string from the error body (e.g. "INVALID_ARGUMENT")
    pub status: Option<String>,
    /// First `reason` found in the error details (e.g. "API_KEY_INVALID")
    pub reason: Option<String>,
}

impl UpstreamError {
    /// An error carrying only a message (transport failures, malformed bodies).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            status: None,
            reason: None,
        }
    }
}

/// Convenience type alias for per-request results.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
