//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::whatsapp::WebhookPayload;

use super::dto::VerifyParams;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/whatsapp", get(verify_webhook).post(receive_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Webhook verification handshake: echo the challenge if the token matches.
async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<String, AppError> {
    match params.accepted_challenge(&state.verify_token) {
        Some(challenge) => {
            info!("webhook verified");
            Ok(challenge.to_string())
        }
        None => Err(AppError::Forbidden {
            message: "Verification failed".to_string(),
        }),
    }
}

/// Webhook notification: hand any text message to a worker and acknowledge at once.
async fn receive_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let payload: WebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "unreadable webhook payload");
        AppError::Internal {
            message: "Error".to_string(),
        }
    })?;

    let Some(message) = payload.first_text_message() else {
        debug!("webhook without a text message");
        return Ok("OK");
    };

    state.bot.spawn_handler(message.from, message.body);

    Ok("OK")
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Forbidden { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, reason = %message, "request failed");
        (status, message).into_response()
    }
}
