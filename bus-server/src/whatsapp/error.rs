//! WhatsApp client error types.

/// Errors that can occur when sending through the WhatsApp Cloud API.
#[derive(Debug, thiserror::Error)]
pub enum WhatsAppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check META_WA_TOKEN")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Refused to send an empty message
    #[error("message body is empty")]
    EmptyMessage,
}
