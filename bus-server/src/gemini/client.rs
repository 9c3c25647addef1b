//! Generative Language API HTTP client.
//!
//! Provides async methods for the three model calls the bot makes:
//! entity extraction, writing a schedule reply, and chatting.

use std::sync::Arc;

use askama::Template;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::DepartureTime;
use crate::schedule::ScheduleResult;

use super::error::GeminiError;
use super::prompts::{ChatReplyPrompt, ExtractEntitiesPrompt, Persona, ScheduleReplyPrompt};
use super::types::{Entities, GenerateContentRequest, GenerateContentResponse, extract_json_object};

/// Default base URL for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,
    /// Model name, e.g. "gemini-2.5-flash"
    pub model: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Bot identity used in prompts
    pub persona: Persona,
}

impl GeminiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            persona: Persona::default(),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Generative Language API client.
///
/// Uses a semaphore to limit concurrent requests, since every inbound
/// message can trigger two model calls.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    persona: Arc<Persona>,
    semaphore: Arc<Semaphore>,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| GeminiError::Api {
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
            persona: Arc::new(config.persona),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Send one prompt and return the model's text.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeminiError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(GeminiError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeminiError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        parsed.text().ok_or(GeminiError::EmptyResponse)
    }

    /// Classify a message and extract destination and time.
    ///
    /// `now` is the local time, used when the user says "now" or gives
    /// no time at all.
    pub async fn extract_entities(
        &self,
        message: &str,
        now: DepartureTime,
    ) -> Result<Entities, GeminiError> {
        let prompt = ExtractEntitiesPrompt { now, message }.render()?;
        let request = GenerateContentRequest::from_prompt(prompt).json_response();

        let raw = self.generate(&request).await?;
        debug!(raw = %raw, "entity extraction response");

        let json = extract_json_object(&raw).ok_or_else(|| GeminiError::Json {
            message: "no JSON object in response".to_string(),
            body: Some(raw.chars().take(500).collect()),
        })?;

        serde_json::from_str(json).map_err(|e| GeminiError::Json {
            message: e.to_string(),
            body: Some(json.chars().take(500).collect()),
        })
    }

    /// Write a friendly reply describing a schedule result.
    pub async fn write_schedule_reply(
        &self,
        result: &ScheduleResult,
    ) -> Result<String, GeminiError> {
        let data = serde_json::to_string_pretty(result).map_err(|e| GeminiError::Json {
            message: e.to_string(),
            body: None,
        })?;
        let prompt = ScheduleReplyPrompt {
            college: &self.persona.college,
            data: &data,
        }
        .render()?;

        let reply = self
            .generate(&GenerateContentRequest::from_prompt(prompt))
            .await?;
        Ok(strip_code_fences(&reply))
    }

    /// Answer small talk or a general question.
    pub async fn chat_reply(&self, message: &str) -> Result<String, GeminiError> {
        let prompt = ChatReplyPrompt {
            bot_name: &self.persona.bot_name,
            college: &self.persona.college,
            knowledge: &self.persona.knowledge,
            message,
        }
        .render()?;

        let reply = self
            .generate(&GenerateContentRequest::from_prompt(prompt))
            .await?;
        Ok(strip_code_fences(&reply))
    }
}

/// Remove triple back-ticks, which WhatsApp would show literally.
fn strip_code_fences(text: &str) -> String {
    text.replace("```", "")
}
