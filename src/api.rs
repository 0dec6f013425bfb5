//! HTTP relay API
//!
//! Forwards conversations from the chat client to the completion provider so
//! the credential never leaves the server.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::config::{ConfigError, RelayConfig};
use crate::llm::{LlmError, LlmService, LoggingService, OpenAIService};
use std::sync::Arc;

/// Completion backend as resolved at startup
///
/// A missing credential is kept as a value so every chat request can report
/// it instead of the relay refusing to start.
#[derive(Clone)]
pub enum CompletionBackend {
    Ready(Arc<dyn LlmService>),
    Unconfigured(ConfigError),
}

impl CompletionBackend {
    /// Build the provider client once from configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, LlmError> {
        let api_key = match config.credential() {
            Ok(key) => key.to_string(),
            Err(e) => return Ok(CompletionBackend::Unconfigured(e)),
        };
        let service = OpenAIService::new(api_key, &config.openai_base_url, config.request_timeout)?;
        Ok(CompletionBackend::Ready(Arc::new(LoggingService::new(
            Arc::new(service),
        ))))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, CompletionBackend::Ready(_))
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub completion: CompletionBackend,
}

impl AppState {
    pub fn new(completion: CompletionBackend) -> Self {
        Self { completion }
    }
}
