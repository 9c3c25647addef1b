//! WhatsApp Cloud API client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info};

use super::error::WhatsAppError;
use super::types::{SendMessageRequest, SendMessageResponse};

/// Default base URL for the Graph API.
const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v18.0";

/// Configuration for the WhatsApp client.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Bearer access token
    pub token: String,
    /// Business phone number ID messages are sent from
    pub phone_id: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WhatsAppConfig {
    /// Create a new config with the given token and phone number ID.
    pub fn new(token: impl Into<String>, phone_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            phone_id: phone_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for sending WhatsApp messages.
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    messages_url: String,
}

impl WhatsAppClient {
    /// Create a new WhatsApp client.
    pub fn new(config: WhatsAppConfig) -> Result<Self, WhatsAppError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            WhatsAppError::Api {
                status: 0,
                message: "Invalid access token format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            messages_url: format!("{}/{}/messages", config.base_url, config.phone_id),
        })
    }

    /// Send a text message to `to`.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<(), WhatsAppError> {
        if body.trim().is_empty() {
            return Err(WhatsAppError::EmptyMessage);
        }

        let response = self
            .http
            .post(&self.messages_url)
            .json(&SendMessageRequest::text(to, body))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WhatsAppError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<SendMessageResponse>(&body) {
            Ok(sent) => {
                let ids: Vec<_> = sent.messages.iter().map(|m| m.id.as_str()).collect();
                info!(to, ?ids, "message sent");
            }
            Err(e) => debug!(to, error = %e, body = %body, "message sent, unexpected response body"),
        }

        Ok(())
    }

    /// The full messages endpoint URL.
    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }
}
