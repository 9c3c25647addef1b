use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_server::bot::Bot;
use bus_server::config::AppConfig;
use bus_server::gemini::{GeminiClient, GeminiConfig};
use bus_server::timetable::{JsonFileStore, TimetableStore};
use bus_server::web::{AppState, create_router};
use bus_server::whatsapp::{WhatsAppClient, WhatsAppConfig};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bus_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let gemini = GeminiClient::new(
        GeminiConfig::new(&config.gemini_api_key).with_model(&config.gemini_model),
    )?;
    let whatsapp = WhatsAppClient::new(WhatsAppConfig::new(&config.wa_token, &config.wa_phone_id))?;

    // The timetable is re-read for every query; check it once so a bad file shows up at start-up
    let store = JsonFileStore::new(&config.timetable_path);
    match store.load() {
        Ok(routes) => info!(
            path = %store.path().display(),
            routes = routes.len(),
            "timetable loaded"
        ),
        Err(e) => error!(error = %e, "timetable can't be loaded, bus queries will fail"),
    }

    let bot = Bot::new(gemini, whatsapp, store, config.utc_offset);
    let app = create_router(AppState::new(bot, config.verify_token.as_str()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "bus bot listening");
    info!("  GET  /health    - Health check");
    info!("  GET  /whatsapp  - Webhook verification");
    info!("  POST /whatsapp  - Incoming messages");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
