//! Bus schedule chatbot server.
//!
//! A WhatsApp bot that answers: "when is the next bus to X after time T?"
//! from a JSON timetable, and chats about everything else.

pub mod bot;
pub mod config;
pub mod domain;
pub mod gemini;
pub mod schedule;
pub mod timetable;
pub mod web;
pub mod whatsapp;
