//! Prompt templates sent to the language model.

use askama::Template;

use crate::domain::DepartureTime;

/// Who the bot is and what it knows beyond the timetable.
#[derive(Debug, Clone)]
pub struct Persona {
    pub bot_name: String,
    pub college: String,
    /// Facts the chat reply may draw on, one per line.
    pub knowledge: Vec<String>,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            bot_name: "Baby (B.A.B.Y. = Benjanapadavu Area Bus Yatra)".to_string(),
            college: "Canara Engineering College (CEC)".to_string(),
            knowledge: vec![
                "You know the schedules for the Mangalore and BC Road routes.".to_string(),
                "The Rajkumar bus is the FAST route to Mangalore, along the highway via Farengipete."
                    .to_string(),
                "The Rajalaxmi bus is the SLOW route, through Nermarga and Polali.".to_string(),
                "The fare is cheap, around ₹20-₹30, but you don't know the exact price."
                    .to_string(),
                "The buses are private, not government, and have no AC.".to_string(),
            ],
        }
    }
}

/// Classify a message and pull out destination and time.
#[derive(Template)]
#[template(path = "extract_entities.txt")]
pub struct ExtractEntitiesPrompt<'a> {
    pub now: DepartureTime,
    pub message: &'a str,
}

/// Turn a `found` schedule result into a friendly reply.
#[derive(Template)]
#[template(path = "schedule_reply.txt")]
pub struct ScheduleReplyPrompt<'a> {
    pub college: &'a str,
    /// Pretty-printed result JSON
    pub data: &'a str,
}

/// Answer small talk and general questions.
#[derive(Template)]
#[template(path = "chat_reply.txt")]
pub struct ChatReplyPrompt<'a> {
    pub bot_name: &'a str,
    pub college: &'a str,
    pub knowledge: &'a [String],
    pub message: &'a str,
}
