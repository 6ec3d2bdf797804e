//! Blocking HTTP client for the Gemini generateContent API, plus a mock
//! provider for tests.

use serde::{Deserialize, Serialize};

use super::{NarrativeProvider, ProviderError};
use crate::config;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Lower temperature for more consistent/conservative medical text.
const GENERATION_TEMPERATURE: f64 = 0.4;

/// Gemini HTTP client. One request per generation run; the pipeline
/// suspends on nothing else.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client configured from the environment, with a 2-minute timeout.
    pub fn from_env() -> Result<Self, ProviderError> {
        let key = config::api_key().ok_or(ProviderError::MissingApiKey(config::API_KEY_ENV))?;
        Self::new(&key, config::GEMINI_MODEL, 120)
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

// ── Wire types ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl NarrativeProvider for GeminiClient {
    fn generate(&self, prompt: &str, system: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part { text: system }],
            },
            generation_config: GenerationConfig {
                temperature: GENERATION_TEMPERATURE,
            },
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                ProviderError::Connection(GEMINI_BASE_URL.to_string())
            } else if e.is_timeout() {
                ProviderError::Timeout(self.timeout_secs)
            } else {
                ProviderError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Mock provider for testing — returns a configurable response.
pub struct MockNarrativeProvider {
    response: Result<String, String>,
}

impl MockNarrativeProvider {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
        }
    }

    /// A mock that fails every call, for abort-path tests.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

impl NarrativeProvider for MockNarrativeProvider {
    fn generate(&self, _prompt: &str, _system: &str) -> Result<String, ProviderError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(ProviderError::Connection(msg.clone())),
        }
    }
}
