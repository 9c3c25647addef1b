//! Language model client error types.

/// Errors from the Generative Language API client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or missing API key
    #[error("unauthorized: check GEMINI_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by Gemini API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The model returned no text (e.g. the prompt was blocked)
    #[error("model returned no text")]
    EmptyResponse,

    /// Prompt template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}
