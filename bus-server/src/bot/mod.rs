//! Per-message worker.
//!
//! Each inbound text is handled on its own task: the model decides what
//! the user wants, bus questions are answered from the timetable, and
//! everything else goes to the chat model. The reply is always sent,
//! falling back to fixed texts when a collaborator fails.

mod replies;

use std::future::Future;
use std::sync::Arc;

use chrono::FixedOffset;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::local_time;
use crate::domain::DepartureTime;
use crate::gemini::{Entities, GeminiClient, GeminiError, Intent};
use crate::schedule::{ScheduleResult, lookup};
use crate::timetable::TimetableStore;
use crate::whatsapp::{WhatsAppClient, WhatsAppError};

pub use replies::{CHAT_FALLBACK, GLITCH, NOT_UNDERSTOOD, SOMETHING_WRONG, UNKNOWN_INTENT};

/// Language model calls the bot depends on.
pub trait Assistant: Send + Sync {
    fn extract_entities(
        &self,
        message: &str,
        now: DepartureTime,
    ) -> impl Future<Output = Result<Entities, GeminiError>> + Send;

    fn write_schedule_reply(
        &self,
        result: &ScheduleResult,
    ) -> impl Future<Output = Result<String, GeminiError>> + Send;

    fn chat_reply(&self, message: &str) -> impl Future<Output = Result<String, GeminiError>> + Send;
}

/// Outbound message delivery.
pub trait Messenger: Send + Sync {
    fn send_text(
        &self,
        to: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), WhatsAppError>> + Send;
}

impl Assistant for GeminiClient {
    fn extract_entities(
        &self,
        message: &str,
        now: DepartureTime,
    ) -> impl Future<Output = Result<Entities, GeminiError>> + Send {
        GeminiClient::extract_entities(self, message, now)
    }

    fn write_schedule_reply(
        &self,
        result: &ScheduleResult,
    ) -> impl Future<Output = Result<String, GeminiError>> + Send {
        GeminiClient::write_schedule_reply(self, result)
    }

    fn chat_reply(&self, message: &str) -> impl Future<Output = Result<String, GeminiError>> + Send {
        GeminiClient::chat_reply(self, message)
    }
}

impl Messenger for WhatsAppClient {
    fn send_text(
        &self,
        to: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), WhatsAppError>> + Send {
        WhatsAppClient::send_text(self, to, body)
    }
}

/// The bot: turns one inbound message into one reply.
pub struct Bot<A, M, S> {
    assistant: A,
    messenger: M,
    store: Arc<S>,
    utc_offset: FixedOffset,
}

impl<A, M, S> Bot<A, M, S>
where
    A: Assistant,
    M: Messenger,
    S: TimetableStore + Send + Sync + 'static,
{
    pub fn new(assistant: A, messenger: M, store: S, utc_offset: FixedOffset) -> Self {
        Self {
            assistant,
            messenger,
            store: Arc::new(store),
            utc_offset,
        }
    }

    /// Handle a message on its own task.
    ///
    /// If that task dies without replying, the sender still gets [`GLITCH`].
    pub fn spawn_handler(self: &Arc<Self>, from: String, text: String) -> JoinHandle<()>
    where
        A: 'static,
        M: 'static,
    {
        let bot = Arc::clone(self);
        tokio::spawn(async move {
            let worker = tokio::spawn({
                let bot = Arc::clone(&bot);
                let from = from.clone();
                async move { bot.handle_message(&from, &text).await }
            });

            if let Err(e) = worker.await {
                error!(from = %from, error = %e, "message worker failed");
                if let Err(e) = bot.messenger.send_text(&from, GLITCH).await {
                    error!(from = %from, error = %e, "failed to send apology");
                }
            }
        })
    }

    /// Work out a reply to `text` and send it to `from`.
    pub async fn handle_message(&self, from: &str, text: &str) {
        info!(from, text, "processing message");

        let reply = self.reply_to(text).await;

        if let Err(e) = self.messenger.send_text(from, &reply).await {
            error!(from, error = %e, "failed to send reply");
        }
    }

    /// Work out the reply to a message.
    pub async fn reply_to(&self, text: &str) -> String {
        let now = local_time(self.utc_offset);

        let entities = match self.assistant.extract_entities(text, now).await {
            Ok(entities) => entities,
            Err(e) => {
                warn!(error = %e, "entity extraction failed, treating as chat");
                Entities::chat()
            }
        };

        match entities.intent {
            Intent::TimeQuery => self.schedule_reply(&entities).await,
            Intent::GeneralQuestion | Intent::Chat => {
                self.assistant.chat_reply(text).await.unwrap_or_else(|e| {
                    warn!(error = %e, "chat reply failed");
                    CHAT_FALLBACK.to_string()
                })
            }
            Intent::Unknown => UNKNOWN_INTENT.to_string(),
        }
    }

    async fn schedule_reply(&self, entities: &Entities) -> String {
        let query = entities.query();
        let store = Arc::clone(&self.store);

        // The timetable is read from disk, so keep it off the async workers
        let result = match tokio::task::spawn_blocking(move || lookup(store.as_ref(), &query)).await
        {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "schedule lookup task failed");
                return GLITCH.to_string();
            }
        };

        info!(status = result.status(), "schedule lookup finished");

        let rendered = match &result {
            ScheduleResult::Found(_) => {
                return match self.assistant.write_schedule_reply(&result).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        warn!(error = %e, "reply writer failed, sending raw result");
                        serde_json::to_string_pretty(&result)
                            .unwrap_or_else(|_| SOMETHING_WRONG.to_string())
                    }
                };
            }
            ScheduleResult::TooLate(late) => replies::too_late(late),
            ScheduleResult::NotFound(not_found) => replies::not_found(not_found),
            ScheduleResult::NoRoute {
                search_term,
                known_routes,
                ..
            } => replies::no_route(search_term, known_routes),
            ScheduleResult::NotUnderstood { .. } => Ok(NOT_UNDERSTOOD.to_string()),
            ScheduleResult::Error { .. } => Ok(SOMETHING_WRONG.to_string()),
        };

        rendered.unwrap_or_else(|e| {
            error!(error = %e, "failed to render reply");
            GLITCH.to_string()
        })
    }
}
