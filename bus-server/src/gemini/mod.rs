//! Language model client (Google Generative Language API).
//!
//! The bot makes three kinds of model call:
//! - entity extraction: intent, destination keyword and target time
//! - writing a friendly reply for a `found` schedule result
//! - answering small talk and general questions
//!
//! Prompt text lives in askama templates under `templates/`.

mod client;
mod error;
mod prompts;
mod types;

pub use client::{DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use error::GeminiError;
pub use prompts::Persona;
pub use types::{
    Candidate, Content, Entities, GenerateContentRequest, GenerateContentResponse, Intent, Part,
    extract_json_object,
};
