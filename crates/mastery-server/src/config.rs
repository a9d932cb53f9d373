//! Configuration for the CSS Mastery server.
//!
//! Read from `mastery.json`. Every field is optional; a missing file yields
//! the defaults.

use std::path::Path;
use std::sync::Arc;

use mastery_tutor::gemini::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use mastery_tutor::{GeminiClient, TextGenerator};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// The default config file name.
pub const CONFIG_FILE_NAME: &str = "mastery.json";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_event_capacity() -> usize {
    100
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Main server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Interface to listen on.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-subscriber buffer of the WebSocket event channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Tutor text-generation settings.
    #[serde(default)]
    pub tutor: TutorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            event_capacity: default_event_capacity(),
            tutor: TutorConfig::default(),
        }
    }
}

impl Config {
    /// Loads `mastery.json` from the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ServerError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads `mastery.json` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::ConfigParseError` if the file cannot be read or
    /// holds invalid JSON or an unknown provider, and
    /// `ServerError::ConfigValidationError` if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(ServerError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ServerError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::ConfigValidationError` if any check fails.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::config_validation(
                "host must not be empty",
                "Set host to an interface address such as 127.0.0.1 in your mastery.json",
            ));
        }

        if self.port == 0 {
            return Err(ServerError::config_validation(
                "port must be greater than 0",
                "Set port to a free TCP port in your mastery.json or pass --port",
            ));
        }

        if self.event_capacity == 0 {
            return Err(ServerError::config_validation(
                "eventCapacity must be greater than 0",
                "Set eventCapacity to at least 1 in your mastery.json",
            ));
        }

        self.tutor.validate()
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Tutor text-generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorConfig {
    /// Which service answers questions.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
        }
    }
}

impl TutorConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("tutor.model", &self.model, "Set tutor.model, e.g. \"gemini-2.5-flash\""),
            ("tutor.apiKeyEnv", &self.api_key_env, "Set tutor.apiKeyEnv, e.g. \"GEMINI_API_KEY\""),
            ("tutor.baseUrl", &self.base_url, "Set tutor.baseUrl to the provider's API origin"),
        ];
        for (name, value, suggestion) in fields {
            if value.trim().is_empty() {
                return Err(ServerError::config_validation(
                    format!("{name} must not be empty"),
                    suggestion,
                ));
            }
        }
        Ok(())
    }

    /// Builds the configured text generator.
    ///
    /// The API key is read from the environment now. A missing key is not an
    /// error here; each tutor request then fails and the learner sees the
    /// usual apology.
    #[must_use]
    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        match self.provider {
            LlmProvider::Gemini => Arc::new(
                GeminiClient::from_env(&self.api_key_env)
                    .model(&self.model)
                    .base_url(&self.base_url),
            ),
        }
    }
}

/// Supported text-generation providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LlmProvider {
    /// Google Gemini (default).
    #[default]
    Gemini,
}

impl LlmProvider {
    /// Parses a string into an `LlmProvider`, case-insensitively.
    fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for LlmProvider {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_case_insensitive(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid LLM provider '{s}': expected one of 'gemini'"
            ))
        })
    }
}

impl Serialize for LlmProvider {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self {
            Self::Gemini => "gemini",
        };
        serializer.serialize_str(s)
    }
}
