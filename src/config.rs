//! Environment configuration for the relay and the chat client
//!
//! Values come from the process environment. `.env.local` and `.env` are
//! loaded first when present, without overriding variables that are already
//! set.

use crate::llm::DEFAULT_OPENAI_BASE_URL;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration problems surfaced to callers instead of aborting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OpenAI API key is not configured")]
    MissingApiKey,
}

/// Load `.env.local` and `.env` from the working directory, if present
pub fn load_dotenv() {
    for file in [".env.local", ".env"] {
        match dotenvy::from_filename(file) {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(file, error = %e, "Failed to load environment file"),
        }
    }
}

/// Relay server configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub request_timeout: Duration,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("INBUDDY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            openai_api_key: lookup("OPENAI_API_KEY"),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            request_timeout: lookup("INBUDDY_REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        }
    }

    /// The provider credential; blank values count as missing
    pub fn credential(&self) -> Result<&str, ConfigError> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Terminal chat client configuration
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    pub relay_url: String,
    pub request_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl ChatClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            relay_url: lookup("INBUDDY_RELAY_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string()),
            request_timeout: lookup("INBUDDY_REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            log_file: lookup("INBUDDY_CHAT_LOG").map(PathBuf::from),
        }
    }
}
