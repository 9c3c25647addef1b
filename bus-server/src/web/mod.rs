//! Web layer: webhook verification, message intake and health check.

mod dto;
mod routes;
mod state;

pub use dto::VerifyParams;
pub use routes::{AppError, create_router};
pub use state::{AppState, ChatBot};
