//! Gemini provider using the Generative Language `generateContent` REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TutorError};
use crate::generator::{GenerationRequest, TextGenerator};

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Consulted when the configured variable is unset.
const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Gemini text generator.
///
/// A client without a key is still usable: every call fails with
/// [`TutorError::MissingCredential`] before touching the network.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client reading its key from `var`, then from `API_KEY`.
    #[must_use]
    pub fn from_env(var: &str) -> Self {
        let api_key = read_key(var).or_else(|| read_key(FALLBACK_API_KEY_ENV));
        Self {
            client: Client::new(),
            api_key,
            api_key_env: var.to_string(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Create with an explicit API key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            api_key_env: DEFAULT_API_KEY_ENV.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Override the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Returns `true` if a key was found.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn read_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|key| !key.trim().is_empty())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated. Empty when absent.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(TutorError::missing_credential(&self.api_key_env));
        };

        let body = GenerateContentBody {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: &request.system_instruction,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
        };

        debug!(model = %self.model, len = request.prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TutorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_body = response.text().await.unwrap_or_default();
            return Err(TutorError::api(status, error_body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TutorError::Decode(e.to_string()))?;

        Ok(parsed.into_text())
    }
}
