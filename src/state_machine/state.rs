//! Session state types

use crate::llm::ChatMessage;
use crate::session::RelayErrorKind;
use crate::system_prompt::{system_message, welcome_message};
use serde::Serialize;

/// Session state
///
/// A single tagged value replaces separate loading / initialized / error
/// flags, so combinations like "loading with an error" cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing mounted yet, conversation empty
    #[default]
    Uninitialized,

    /// Welcome message being seeded
    Initializing,

    /// Ready for user input
    Idle,

    /// One relay request in flight
    Submitting,

    /// Last request failed; ready for input, UI shows the message
    Error {
        message: String,
        kind: RelayErrorKind,
    },
}

impl SessionState {
    /// Whether a loading indicator should be shown and submit disabled
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Initializing | SessionState::Submitting)
    }

    pub fn is_initialized(&self) -> bool {
        matches!(
            self,
            SessionState::Idle | SessionState::Submitting | SessionState::Error { .. }
        )
    }

    /// Error text of the last failed request, if the session is in error
    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether a user submission would be accepted
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Error { .. })
    }
}

/// Immutable configuration of a session
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Prepended to every request, never stored in the conversation
    pub system_prompt: ChatMessage,
    /// Seeded as the first assistant turn
    pub welcome: ChatMessage,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            system_prompt: system_message(),
            welcome: welcome_message(),
        }
    }
}
