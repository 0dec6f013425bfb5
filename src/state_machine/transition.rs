//! Pure state transition function

use super::{error_turn, Effect, Event, SessionContext, SessionState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Session already initialized")]
    AlreadyInitialized,
    #[error("Session not initialized")]
    NotInitialized,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A request is already in flight")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Initialization
        // ============================================================
        (SessionState::Uninitialized, Event::Mount) => {
            Ok(TransitionResult::new(SessionState::Initializing)
                .with_effect(Effect::append(context.welcome.clone()))
                .with_effect(Effect::ScrollToBottom)
                .with_effect(Effect::CompleteInitialization))
        }

        (SessionState::Initializing, Event::Initialized) => {
            Ok(TransitionResult::new(SessionState::Idle))
        }

        (_, Event::Mount) => Err(TransitionError::AlreadyInitialized),

        // ============================================================
        // User submission
        // ============================================================
        (state, Event::UserSubmit { text }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            match state {
                SessionState::Idle | SessionState::Error { .. } => {
                    Ok(TransitionResult::new(SessionState::Submitting).with_effects([
                        Effect::append_user(trimmed),
                        Effect::ScrollToBottom,
                        Effect::RequestCompletion,
                    ]))
                }
                SessionState::Submitting => Err(TransitionError::Busy),
                SessionState::Uninitialized | SessionState::Initializing => {
                    Err(TransitionError::NotInitialized)
                }
            }
        }

        // ============================================================
        // Relay outcome
        // ============================================================
        (SessionState::Submitting, Event::RelayReply { message }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::append(message))
                .with_effect(Effect::ScrollToBottom))
        }

        (SessionState::Submitting, Event::RelayFailed { message, kind }) => {
            let turn = error_turn(&message);
            Ok(TransitionResult::new(SessionState::Error { message, kind })
                .with_effect(Effect::append(turn))
                .with_effect(Effect::ScrollToBottom))
        }

        // ============================================================
        // Invalid transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;
    use crate::session::RelayErrorKind;

    fn ctx() -> SessionContext {
        SessionContext::default()
    }

    #[test]
    fn test_mount_seeds_welcome() {
        let result = transition(&SessionState::Uninitialized, &ctx(), Event::Mount).unwrap();
        assert_eq!(result.new_state, SessionState::Initializing);
        assert_eq!(
            result.effects,
            vec![
                Effect::AppendMessage(ctx().welcome),
                Effect::ScrollToBottom,
                Effect::CompleteInitialization,
            ]
        );

        let result = transition(&result.new_state, &ctx(), Event::Initialized).unwrap();
        assert_eq!(result.new_state, SessionState::Idle);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_second_mount_rejected() {
        for state in [SessionState::Initializing, SessionState::Idle, SessionState::Submitting] {
            let result = transition(&state, &ctx(), Event::Mount);
            assert_eq!(result.unwrap_err(), TransitionError::AlreadyInitialized);
        }
    }

    #[test]
    fn test_submit_trims_and_requests() {
        let result = transition(
            &SessionState::Idle,
            &ctx(),
            Event::UserSubmit {
                text: "  How do I improve my headline?\n".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state, SessionState::Submitting);
        assert_eq!(
            result.effects,
            vec![
                Effect::AppendMessage(ChatMessage::user("How do I improve my headline?")),
                Effect::ScrollToBottom,
                Effect::RequestCompletion,
            ]
        );
    }

    #[test]
    fn test_blank_submit_rejected() {
        let result = transition(
            &SessionState::Idle,
            &ctx(),
            Event::UserSubmit {
                text: "   ".to_string(),
            },
        );
        assert_eq!(result.unwrap_err(), TransitionError::EmptyMessage);
    }

    #[test]
    fn test_submit_while_busy_rejected() {
        let result = transition(
            &SessionState::Submitting,
            &ctx(),
            Event::UserSubmit {
                text: "second".to_string(),
            },
        );
        assert_eq!(result.unwrap_err(), TransitionError::Busy);
    }

    #[test]
    fn test_submit_before_init_rejected() {
        let result = transition(
            &SessionState::Uninitialized,
            &ctx(),
            Event::UserSubmit {
                text: "hi".to_string(),
            },
        );
        assert_eq!(result.unwrap_err(), TransitionError::NotInitialized);
    }

    #[test]
    fn test_reply_returns_to_idle() {
        let reply = ChatMessage::assistant("Lead with your value.");
        let result = transition(
            &SessionState::Submitting,
            &ctx(),
            Event::RelayReply {
                message: reply.clone(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, SessionState::Idle);
        assert_eq!(
            result.effects,
            vec![Effect::AppendMessage(reply), Effect::ScrollToBottom]
        );
    }

    #[test]
    fn test_failure_appends_error_turn() {
        let result = transition(
            &SessionState::Submitting,
            &ctx(),
            Event::RelayFailed {
                message: "Failed to get response from OpenAI".to_string(),
                kind: RelayErrorKind::Status,
            },
        )
        .unwrap();

        assert_eq!(
            result.new_state.error(),
            Some("Failed to get response from OpenAI")
        );
        assert_eq!(
            result.effects[0],
            Effect::AppendMessage(ChatMessage::assistant(
                "Error: Failed to get response from OpenAI"
            ))
        );
    }

    #[test]
    fn test_error_recovers_on_submit() {
        let state = SessionState::Error {
            message: "boom".to_string(),
            kind: RelayErrorKind::Transport,
        };
        let result = transition(
            &state,
            &ctx(),
            Event::UserSubmit {
                text: "retry".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, SessionState::Submitting);
        assert_eq!(result.new_state.error(), None);
    }

    #[test]
    fn test_stray_reply_is_invalid() {
        let result = transition(
            &SessionState::Idle,
            &ctx(),
            Event::RelayReply {
                message: ChatMessage::assistant("late"),
            },
        );
        assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }
}
