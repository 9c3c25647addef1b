//! Application configuration.
//!
//! Everything the server needs from its environment is read once at
//! start-up into an [`AppConfig`] and passed down explicitly.

use std::path::PathBuf;

use chrono::{FixedOffset, Utc};
use tracing::warn;

use crate::domain::DepartureTime;
use crate::gemini::DEFAULT_MODEL;

/// Default listening port.
const DEFAULT_PORT: u16 = 5000;

/// India Standard Time, UTC+05:30.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but can't be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,

    /// WhatsApp Cloud API access token
    pub wa_token: String,
    /// Business phone number ID
    pub wa_phone_id: String,
    /// Shared secret for webhook verification
    pub verify_token: String,

    pub port: u16,
    pub timetable_path: PathBuf,

    /// Offset of the riders' local time from UTC.
    pub utc_offset: FixedOffset,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = |name: &'static str| {
            lookup(name).filter(|v| !v.is_empty()).unwrap_or_else(|| {
                warn!("{name} not set. Calls that need it will fail.");
                String::new()
            })
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let offset_minutes = match lookup("UTC_OFFSET_MINUTES") {
            Some(value) => value.parse::<i32>().map_err(|_| ConfigError::Invalid {
                name: "UTC_OFFSET_MINUTES",
                value,
            })?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let utc_offset =
            FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| ConfigError::Invalid {
                name: "UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        Ok(Self {
            gemini_api_key: secret("GEMINI_API_KEY"),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            wa_token: secret("META_WA_TOKEN"),
            wa_phone_id: secret("META_WA_PHONE_ID"),
            verify_token: secret("META_VERIFY_TOKEN"),
            port,
            timetable_path: lookup("TIMETABLE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("timetable.json")),
            utc_offset,
        })
    }
}

/// The current time of day at `offset` from UTC.
pub fn local_time(offset: FixedOffset) -> DepartureTime {
    DepartureTime::from(Utc::now().with_timezone(&offset).time())
}
