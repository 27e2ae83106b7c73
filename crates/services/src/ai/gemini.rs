use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    /// No timeout unless set; a hung call keeps the session loading.
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }

    /// Read the credential and endpoint from the environment.
    ///
    /// Returns `None` when no non-blank API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GeminiConfig::from_env`] with variables read through `lookup`.
    ///
    /// A blank `SATPREP_AI_API_KEY` falls through to `GEMINI_API_KEY`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = present("SATPREP_AI_API_KEY").or_else(|| present("GEMINI_API_KEY"))?;
        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = present("SATPREP_AI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = present("SATPREP_AI_MODEL") {
            config.model = model;
        }
        Some(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Thin client for the `generateContent` call with a JSON response schema.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Option<GeminiConfig>,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be built.
    pub fn new(config: Option<GeminiConfig>) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.as_ref().and_then(|c| c.timeout) {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.model.as_str())
    }

    /// Generate a JSON document matching `schema` from a prompt.
    ///
    /// Returns the raw text of the first candidate; parsing is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the client is disabled, the request fails,
    /// or the response carries no text.
    pub async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, SourceError> {
        let config = self.config.as_ref().ok_or(SourceError::Disabled)?;

        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature: config.temperature,
            },
        };

        debug!(model = %config.model, "sending generateContent request");
        let response = self
            .client
            .post(config.endpoint())
            .header("x-goog-api-key", config.api_key.as_str())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.first_text().ok_or(SourceError::EmptyResponse)?;
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
