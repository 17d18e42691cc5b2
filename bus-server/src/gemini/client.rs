//! HTTP client for the Gemini generateContent API.
//!
//! Sends one prompt per suggestion request and validates the model's JSON
//! output against the declared response schema.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::ConnectionSuggester;
use super::error::SuggestError;
use super::prompt::build_prompt;
use super::types::{ConnectionQuery, SuggestionResponse};

/// Default base URL for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model to request suggestions from.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Model name appended to the generateContent path
    pub model: String,
    /// Request timeout in seconds; expiry is a transport failure
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// Wire types for the generateContent request/response envelope. Only the
// fields this client touches are modeled.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini API client.
///
/// One suggestion request is one generateContent call; there is no retry
/// or backoff here.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, SuggestError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| SuggestError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-goog-api-key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            model: config.model,
        })
    }

    /// Extract the model's text output from the response envelope.
    fn response_text(response: GenerateResponse) -> Result<String, SuggestError> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(SuggestError::Schema {
                message: "response contained no candidate text".to_string(),
                body: None,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl ConnectionSuggester for GeminiClient {
    async fn suggest(&self, query: &ConnectionQuery) -> Result<SuggestionResponse, SuggestError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(query),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        tracing::debug!(origin = %query.origin, destination = %query.destination, "requesting connection suggestions");

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SuggestError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SuggestError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let envelope: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| SuggestError::Schema {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let text = Self::response_text(envelope)?;

        // The model's text is itself JSON; this parse is the output-schema
        // validation.
        serde_json::from_str(&text).map_err(|e| SuggestError::Schema {
            message: e.to_string(),
            body: Some(text.chars().take(500).collect()),
        })
    }
}
