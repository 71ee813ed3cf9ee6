//! Configuration management for Nutrion.
//!
//! The optional TOML file holds the model, endpoint, upload and logging
//! settings. The API key normally comes from the environment (or a `.env`
//! file loaded by the binary). At startup the two are combined once into an
//! immutable [`Settings`] value that is passed to everything that talks to
//! the model.

mod credential;
mod types;
mod validate;

pub use credential::CREDENTIAL_ENV_VARS;
pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Root configuration structure for Nutrion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API settings
    pub gemini: GeminiConfig,

    /// Accepted uploads
    pub upload: UploadConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.nutrion.nutrion/config.toml
    /// - Linux: ~/.config/nutrion/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\nutrion\config\config.toml
    ///
    /// Falls back to ~/.nutrion/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "nutrion", "nutrion")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".nutrion").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Resolved, read-only runtime settings: credential plus model identifier.
///
/// Built once at startup. Fails when no API key can be found, which the
/// binary treats as fatal.
#[derive(Clone)]
pub struct Settings {
    api_key: String,
    model: String,
    endpoint: String,
}

impl Settings {
    /// Resolve settings from config and the process environment.
    ///
    /// `model_override` replaces `gemini.model` when given (e.g. `--model`)
    /// and is held to the same model-id rules as the config file.
    pub fn from_config(config: &Config, model_override: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_config_with(config, model_override, |name| std::env::var(name).ok())
    }

    pub(crate) fn from_config_with(
        config: &Config,
        model_override: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = credential::resolve_credential(&config.gemini.api_key, lookup)
            .ok_or(ConfigError::MissingCredential)?;

        let model = model_override
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(config.gemini.model.as_str());
        let model = validate::bare_model_id(model)?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            endpoint: config.gemini.endpoint.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Build settings directly, bypassing config and environment.
    pub fn new(api_key: &str, model: &str, endpoint: &str) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Configured model identifier, without any `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
