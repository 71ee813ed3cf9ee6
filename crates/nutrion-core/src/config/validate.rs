//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

/// Normalize a model identifier to the bare id used in request URLs.
///
/// Accepts `gemini-1.5-flash` or `models/gemini-1.5-flash`. Anything that is
/// empty once the prefix is gone, or still contains a `/`, is rejected.
pub(crate) fn bare_model_id(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    let id = raw.strip_prefix("models/").unwrap_or(raw);
    if id.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "model id must not be empty (got `{raw}`)"
        )));
    }
    if id.contains('/') {
        return Err(ConfigError::ValidationError(format!(
            "model id must be a bare id such as gemini-1.5-flash (got `{raw}`)"
        )));
    }
    Ok(id.to_string())
}

impl Config {
    /// Validate that required values are present and well-formed.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        bare_model_id(&self.gemini.model).map_err(|e| match e {
            ConfigError::ValidationError(msg) => {
                ConfigError::ValidationError(format!("gemini.model: {msg}"))
            }
            other => other,
        })?;
        let endpoint = self.gemini.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::ValidationError(
                "gemini.endpoint must be an http(s) URL".into(),
            ));
        }
        if self.upload.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "upload.supported_formats must list at least one extension".into(),
            ));
        }
        Ok(())
    }
}
