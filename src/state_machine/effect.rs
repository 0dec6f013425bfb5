//! Effects produced by state transitions

use crate::llm::ChatMessage;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the end of the conversation
    AppendMessage(ChatMessage),

    /// Send system prompt plus conversation to the relay
    RequestCompletion,

    /// Bring the newest message into view
    ScrollToBottom,

    /// Seeding finished; the runtime answers with `Event::Initialized`
    CompleteInitialization,
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage(ChatMessage::user(text))
    }

    pub fn append(message: ChatMessage) -> Self {
        Effect::AppendMessage(message)
    }
}

/// Synthetic assistant turn reporting a failed request
pub fn error_turn(message: &str) -> ChatMessage {
    ChatMessage::assistant(format!("Error: {message}"))
}
