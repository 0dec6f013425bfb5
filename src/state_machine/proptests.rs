//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::llm::{ChatMessage, MessageRole};
use crate::session::RelayErrorKind;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_error_kind() -> impl Strategy<Value = RelayErrorKind> {
    prop_oneof![
        Just(RelayErrorKind::Status),
        Just(RelayErrorKind::Transport),
        Just(RelayErrorKind::MalformedResponse),
    ]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Uninitialized),
        Just(SessionState::Initializing),
        Just(SessionState::Idle),
        Just(SessionState::Submitting),
        ("[a-zA-Z ]{1,30}", arb_error_kind())
            .prop_map(|(message, kind)| SessionState::Error { message, kind }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Mount),
        Just(Event::Initialized),
        "[ \t\na-zA-Z]{0,30}".prop_map(|text| Event::UserSubmit { text }),
        "[a-zA-Z ]{1,30}".prop_map(|content| Event::RelayReply {
            message: ChatMessage::assistant(content)
        }),
        ("[a-zA-Z ]{1,30}", arb_error_kind())
            .prop_map(|(message, kind)| Event::RelayFailed { message, kind }),
    ]
}

fn appended(effects: &[Effect]) -> Vec<&ChatMessage> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::AppendMessage(m) => Some(m),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every append is followed by a scroll request in the same batch
    #[test]
    fn append_always_scrolls(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &SessionContext::default(), event) {
            if let Some(last_append) = result
                .effects
                .iter()
                .rposition(|e| matches!(e, Effect::AppendMessage(_)))
            {
                prop_assert!(result.effects[last_append..].contains(&Effect::ScrollToBottom));
            }
        }
    }

    /// Whitespace-only input never changes state
    #[test]
    fn blank_input_rejected(state in arb_state(), text in "[ \t\n]{0,10}") {
        let result = transition(&state, &SessionContext::default(), Event::UserSubmit { text });
        prop_assert!(result.is_err());
    }

    /// An accepted submit appends exactly one user turn and one request
    #[test]
    fn accepted_submit_requests_once(state in arb_state(), text in "[a-zA-Z]{1,20}") {
        if let Ok(result) = transition(&state, &SessionContext::default(), Event::UserSubmit { text: text.clone() }) {
            prop_assert_eq!(&result.new_state, &SessionState::Submitting);
            let messages = appended(&result.effects);
            prop_assert_eq!(messages.len(), 1);
            prop_assert_eq!(messages[0].role, MessageRole::User);
            prop_assert_eq!(&messages[0].content, &text);
            let requests = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RequestCompletion))
                .count();
            prop_assert_eq!(requests, 1);
        }
    }

    /// Submit is accepted exactly when the state accepts input
    #[test]
    fn submit_gate_matches_state(state in arb_state(), text in "[a-zA-Z]{1,20}") {
        let accepted = transition(&state, &SessionContext::default(), Event::UserSubmit { text }).is_ok();
        prop_assert_eq!(accepted, state.accepts_input());
    }

    /// A relay outcome always settles a request with one assistant turn
    #[test]
    fn relay_outcome_settles(event in arb_event()) {
        let is_relay = matches!(event, Event::RelayReply { .. } | Event::RelayFailed { .. });
        let result = transition(&SessionState::Submitting, &SessionContext::default(), event);
        if is_relay {
            let result = result.unwrap();
            prop_assert!(!result.new_state.is_loading());
            prop_assert!(result.new_state.accepts_input());
            let messages = appended(&result.effects);
            prop_assert_eq!(messages.len(), 1);
            prop_assert_eq!(messages[0].role, MessageRole::Assistant);
        }
    }

    /// Relay outcomes outside of a request are never accepted
    #[test]
    fn stray_relay_events_rejected(state in arb_state(), event in arb_event()) {
        let is_relay = matches!(event, Event::RelayReply { .. } | Event::RelayFailed { .. });
        if is_relay && state != SessionState::Submitting {
            prop_assert!(transition(&state, &SessionContext::default(), event).is_err());
        }
    }

    /// Initialization happens at most once
    #[test]
    fn mount_only_from_uninitialized(state in arb_state()) {
        let result = transition(&state, &SessionContext::default(), Event::Mount);
        prop_assert_eq!(result.is_ok(), state == SessionState::Uninitialized);
    }

    /// No transition ever produces a system turn
    #[test]
    fn system_prompt_never_appended(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &SessionContext::default(), event) {
            prop_assert!(appended(&result.effects)
                .iter()
                .all(|m| m.role != MessageRole::System));
        }
    }
}
