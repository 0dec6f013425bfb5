//! Chat session runtime
//!
//! Owns the visible conversation, drives the session state machine, and talks
//! to the relay through [`RelayClient`].

mod compose;
mod controller;
mod relay;

#[cfg(test)]
pub mod testing;

pub use compose::{ComposeBox, Key};
pub use controller::{
    spawn_session, ChatSession, SessionCommand, SessionHandle, SessionSnapshot, Submission,
};
pub use relay::{HttpRelayClient, RelayClient, RelayError, RelayErrorKind, FALLBACK_ERROR};
