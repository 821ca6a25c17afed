//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. The store path and the day-boundary
//! offset are optional; without them the server keeps progress in memory and
//! uses the host's local calendar.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// JSON file backing the key-value store (in-memory when unset)
    pub store_path: Option<PathBuf>,
    /// Fixed UTC offset, in minutes, used to compute calendar days.
    /// `None` means the host's local timezone.
    pub utc_offset_minutes: Option<i32>,
}

impl Config {
    /// Config for tests: in-memory store, UTC days, fixed signing key.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:8081".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            store_path: None,
            utc_offset_minutes: Some(0),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let utc_offset_minutes = match env::var("PROGRESS_UTC_OFFSET_MINUTES") {
            Ok(raw) => Some(parse_utc_offset(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            store_path: env::var("PROGRESS_STORE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            utc_offset_minutes,
        })
    }
}

/// Parse a UTC offset in minutes, rejecting values outside ±14h.
fn parse_utc_offset(raw: &str) -> Result<i32, ConfigError> {
    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid("PROGRESS_UTC_OFFSET_MINUTES", raw.to_string()))?;

    if minutes.abs() > 14 * 60 {
        return Err(ConfigError::Invalid(
            "PROGRESS_UTC_OFFSET_MINUTES",
            raw.to_string(),
        ));
    }
    Ok(minutes)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
