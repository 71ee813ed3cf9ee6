//! Nutrion Core - meal photo analysis through a hosted Gemini model.
//!
//! Takes an uploaded food photo, sends it together with a fixed
//! nutritionist prompt to the model, and hands back the model's text.
//!
//! ```text
//! Upload → prepare_image_part → PromptRequest → Gemini → trimmed text
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use nutrion_core::{Config, Nutrion, Settings, Upload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let settings = Settings::from_config(&config, None)?;
//!     let nutrion = Nutrion::new(settings);
//!
//!     let upload = Upload::from_path("./lunch.jpg".as_ref(), None)?;
//!     println!("{}", nutrion.analyze(Some(&upload)).await?);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod upload;

// Re-exports for convenient access
pub use analysis::{get_model_response, mime_type_for, prepare_image_part, NO_TEXT_FALLBACK};
pub use config::{Config, Settings};
pub use error::{AnalysisError, AnalysisResult, ConfigError, UpstreamError};
pub use llm::{GeminiProvider, GenerativeModel, ImagePart, Part, PromptRequest};
pub use prompt::MEAL_ANALYSIS_PROMPT;
pub use upload::Upload;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nutrion analyzer - the main entry point.
///
/// Owns the resolved settings and the model client; both are read-only for
/// the lifetime of the value.
pub struct Nutrion {
    settings: Settings,
    model: Box<dyn GenerativeModel>,
}

impl Nutrion {
    /// Create an analyzer backed by the Gemini API.
    pub fn new(settings: Settings) -> Self {
        tracing::debug!("Initializing Nutrion v{} with model {}", VERSION, settings.model());
        let model = Box::new(GeminiProvider::new(&settings));
        Self { settings, model }
    }

    /// Create an analyzer backed by any model implementation.
    pub fn with_model(settings: Settings, model: Box<dyn GenerativeModel>) -> Self {
        Self { settings, model }
    }

    /// Get a reference to the resolved settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Analyze one meal photo with the fixed nutritionist prompt.
    ///
    /// `None` sends the prompt alone.
    pub async fn analyze(&self, upload: Option<&Upload>) -> AnalysisResult<String> {
        let image_part = prepare_image_part(upload)?;
        if let Some(ref part) = image_part {
            tracing::info!(
                mime_type = %part.mime_type,
                bytes = part.data.len(),
                "Analyzing meal photo"
            );
        }
        get_model_response(self.model.as_ref(), MEAL_ANALYSIS_PROMPT, image_part).await
    }
}
