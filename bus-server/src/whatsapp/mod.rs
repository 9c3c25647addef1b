//! WhatsApp Cloud API: inbound webhook payloads and outbound messages.

mod client;
mod error;
mod types;

pub use client::{WhatsAppClient, WhatsAppConfig};
pub use error::WhatsAppError;
pub use types::{IncomingText, SendMessageRequest, WebhookPayload};
