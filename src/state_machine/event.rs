//! Events that can occur in a chat session

use crate::llm::ChatMessage;
use crate::session::RelayErrorKind;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Lifecycle events
    Mount,
    Initialized,

    // User events
    UserSubmit {
        text: String,
    },

    // Relay events
    RelayReply {
        message: ChatMessage,
    },
    RelayFailed {
        message: String,
        kind: RelayErrorKind,
    },
}
