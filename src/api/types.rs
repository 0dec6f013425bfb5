//! API request and response types

use crate::format::Block;
use crate::llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request to complete a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// The assistant's reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

/// Request to format assistant text
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub content: String,
}

/// Formatted blocks plus their HTML rendering
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub blocks: Vec<Block>,
    pub html: String,
}

/// Build identification
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
