//! Session runtime executing state machine effects

use super::relay::RelayClient;
use crate::llm::ChatMessage;
use crate::state_machine::{
    transition, Effect, Event, SessionContext, SessionState, TransitionError,
};
use tokio::sync::{mpsc, watch};

/// Published view of a session after every transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub messages: Vec<ChatMessage>,
    /// Bumped on every scroll request; the UI scrolls when it changes
    pub scroll_generation: u64,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }
}

/// Outcome of a user submission
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Rejected by the state machine; nothing changed
    Ignored(TransitionError),
    /// The relay answered and the reply was appended
    Replied,
    /// The relay failed and an error turn was appended
    Failed,
}

/// Chat session owning the conversation and the relay client
pub struct ChatSession<R: RelayClient> {
    context: SessionContext,
    state: SessionState,
    messages: Vec<ChatMessage>,
    scroll_generation: u64,
    relay: R,
    publisher: Option<watch::Sender<SessionSnapshot>>,
}

impl<R: RelayClient> ChatSession<R> {
    pub fn new(relay: R) -> Self {
        Self::with_context(SessionContext::default(), relay)
    }

    pub fn with_context(context: SessionContext, relay: R) -> Self {
        Self {
            context,
            state: SessionState::Uninitialized,
            messages: Vec::new(),
            scroll_generation: 0,
            relay,
            publisher: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn scroll_generation(&self) -> u64 {
        self.scroll_generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            messages: self.messages.clone(),
            scroll_generation: self.scroll_generation,
        }
    }

    /// Seed the welcome message. A second call is a no-op.
    pub async fn initialize(&mut self) {
        match self.process_event(Event::Mount).await {
            Ok(()) => tracing::debug!("Session initialized"),
            Err(TransitionError::AlreadyInitialized) => {
                tracing::debug!("Session already initialized, ignoring mount");
            }
            Err(e) => tracing::error!(error = %e, "Session initialization failed"),
        }
    }

    /// Submit user text and wait for the request to settle
    pub async fn submit(&mut self, text: &str) -> Submission {
        let event = Event::UserSubmit {
            text: text.to_string(),
        };
        match self.process_event(event).await {
            Ok(()) if self.state.error().is_some() => Submission::Failed,
            Ok(()) => Submission::Replied,
            Err(e) => {
                tracing::debug!(reason = %e, "Submission ignored");
                Submission::Ignored(e)
            }
        }
    }

    /// Run an event and every event its effects produce
    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let mut next = Some(event);

        while let Some(event) = next.take() {
            let result = transition(&self.state, &self.context, event)?;
            self.state = result.new_state;

            let mut request_completion = false;
            for effect in result.effects {
                match effect {
                    Effect::AppendMessage(message) => self.messages.push(message),
                    Effect::ScrollToBottom => self.scroll_generation += 1,
                    Effect::CompleteInitialization => next = Some(Event::Initialized),
                    Effect::RequestCompletion => request_completion = true,
                }
            }
            self.publish();

            if request_completion {
                next = Some(self.request_completion().await);
            }
        }

        Ok(())
    }

    /// Call the relay; the outcome is always turned into exactly one event
    async fn request_completion(&self) -> Event {
        let mut payload = Vec::with_capacity(self.messages.len() + 1);
        payload.push(self.context.system_prompt.clone());
        payload.extend(self.messages.iter().cloned());

        tracing::debug!(messages = payload.len(), "Requesting completion");
        match self.relay.complete(&payload).await {
            Ok(message) => Event::RelayReply { message },
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Completion request failed");
                Event::RelayFailed {
                    message: e.to_string(),
                    kind: e.kind(),
                }
            }
        }
    }

    fn publish(&self) {
        if let Some(publisher) = &self.publisher {
            publisher.send_replace(self.snapshot());
        }
    }
}

/// Commands accepted by a spawned session
#[derive(Debug)]
pub enum SessionCommand {
    Submit(String),
}

/// Handle to a session running on its own task
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Queue a submission; returns false if the session is gone or backed up
    pub fn submit(&self, text: String) -> bool {
        self.commands.try_send(SessionCommand::Submit(text)).is_ok()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}

/// Start a session task. It initializes immediately and then serves
/// commands until every handle is dropped.
pub fn spawn_session<R: RelayClient + 'static>(relay: R) -> SessionHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel(16);
    let mut session = ChatSession::new(relay);
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
    session.publisher = Some(snapshot_tx);

    tokio::spawn(async move {
        tracing::info!("Starting chat session");
        session.initialize().await;

        while let Some(command) = cmd_rx.recv().await {
            match command {
                SessionCommand::Submit(text) => {
                    let outcome = session.submit(&text).await;
                    tracing::debug!(?outcome, "Submission settled");
                }
            }
        }

        tracing::info!("Chat session stopped");
    });

    SessionHandle {
        commands: cmd_tx,
        snapshots: snapshot_rx,
    }
}
