//! Client side of the completion relay

use crate::api::{ChatRequest, ChatResponse, ErrorResponse};
use crate::llm::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Shown when the relay fails without saying why
pub const FALLBACK_ERROR: &str = "Failed to get response from OpenAI";

/// Classification of relay failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayErrorKind {
    /// Relay answered with a non-success status
    Status,
    /// Relay could not be reached or the connection failed
    Transport,
    /// Relay answered 2xx without a usable message
    MalformedResponse,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Could not reach the relay: {0}")]
    Transport(String),
    #[error("Malformed relay response: {0}")]
    MalformedResponse(String),
}

impl RelayError {
    pub fn kind(&self) -> RelayErrorKind {
        match self {
            RelayError::Status { .. } => RelayErrorKind::Status,
            RelayError::Transport(_) => RelayErrorKind::Transport,
            RelayError::MalformedResponse(_) => RelayErrorKind::MalformedResponse,
        }
    }
}

/// Sends a full conversation to the relay and returns the assistant reply
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, RelayError>;
}

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for Arc<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, RelayError> {
        (**self).complete(messages).await
    }
}

/// Relay client speaking JSON over HTTP
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(relay_url: &str, timeout: Duration) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", relay_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, RelayError> {
        let request = ChatRequest {
            messages: messages.to_vec(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            tracing::warn!(status = status.as_u16(), error = %message, "Relay request failed");
            return Err(RelayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<ChatResponse>(&body)
            .map(|r| r.message)
            .map_err(|e| RelayError::MalformedResponse(e.to_string()))
    }
}
