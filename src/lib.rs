//! InBuddy - career chat assistant
//!
//! A completion relay that keeps the provider credential server-side, a
//! session controller for the chat client, and the formatter that turns
//! assistant replies into paragraphs, bullet lists, bold runs and links.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod config;
pub mod format;
pub mod llm;
pub mod session;
pub mod state_machine;
pub mod system_prompt;
