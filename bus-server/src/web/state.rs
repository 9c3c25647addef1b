//! Application state for the web layer.

use std::sync::Arc;

use crate::bot::Bot;
use crate::gemini::GeminiClient;
use crate::timetable::JsonFileStore;
use crate::whatsapp::WhatsAppClient;

/// The bot as wired up in production.
pub type ChatBot = Bot<GeminiClient, WhatsAppClient, JsonFileStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Handles each inbound message on its own task
    pub bot: Arc<ChatBot>,

    /// Shared secret for the webhook verification handshake
    pub verify_token: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(bot: ChatBot, verify_token: impl Into<Arc<str>>) -> Self {
        Self {
            bot: Arc::new(bot),
            verify_token: verify_token.into(),
        }
    }
}
