//! Mock relay clients for testing
//!
//! These mocks enable session testing without real I/O.

use super::relay::{RelayClient, RelayError};
use crate::llm::ChatMessage;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock Relay Client
// ============================================================================

/// Mock relay client that returns queued responses
pub struct MockRelayClient {
    responses: Mutex<VecDeque<Result<ChatMessage, RelayError>>>,
    /// Record of every payload sent
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, message: ChatMessage) {
        self.responses.lock().unwrap().push_back(Ok(message));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: RelayError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded payloads
    pub fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<ChatMessage, RelayError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::Transport("No mock response queued".to_string())))
    }
}

impl Default for MockRelayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, RelayError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.next_response()
    }
}

// ============================================================================
// Gated Mock Relay Client (for observing in-flight state)
// ============================================================================

/// Mock relay client that holds each request until released
pub struct GatedRelayClient {
    inner: MockRelayClient,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
    /// Notify once to let the pending request finish
    pub release: Arc<Notify>,
}

impl GatedRelayClient {
    pub fn new() -> Self {
        Self {
            inner: MockRelayClient::new(),
            request_started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, message: ChatMessage) {
        self.inner.queue_reply(message);
    }
}

#[async_trait]
impl RelayClient for GatedRelayClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, RelayError> {
        self.inner.requests.lock().unwrap().push(messages.to_vec());
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.next_response()
    }
}

impl Default for GatedRelayClient {
    fn default() -> Self {
        Self::new()
    }
}
