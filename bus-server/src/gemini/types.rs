//! Generative Language API DTOs and extracted entities.

use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleQuery;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn request containing one text prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            generation_config: None,
        }
    }

    /// Ask the model to answer with JSON only.
    pub fn json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// A turn of conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of content. Only text parts are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Omitted entirely when the prompt was blocked.
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.as_ref()?.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,

    /// e.g. "STOP", "SAFETY", "MAX_TOKENS"
    pub finish_reason: Option<String>,
}

/// What the user wants, as judged by the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asking for a bus at a time.
    TimeQuery,
    /// Asking something about the buses.
    GeneralQuestion,
    /// Small talk.
    #[default]
    Chat,
    #[serde(other)]
    Unknown,
}

/// Entities extracted from a user message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Entities {
    /// A reply without an intent is treated as one the bot doesn't handle.
    #[serde(default = "missing_intent")]
    pub intent: Intent,
    pub search_term: Option<String>,
    pub target_time: Option<String>,
}

fn missing_intent() -> Intent {
    Intent::Unknown
}

impl Entities {
    /// Fallback used when extraction fails.
    pub fn chat() -> Self {
        Self::default()
    }

    /// The schedule query part of the entities.
    pub fn query(&self) -> ScheduleQuery {
        ScheduleQuery {
            search_term: self.search_term.clone(),
            target_time: self.target_time.clone(),
        }
    }
}

/// Slice out the outermost JSON object of a model reply.
///
/// Models sometimes wrap JSON in prose or code fences; everything from the
/// first `{` to the last `}` is kept.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
