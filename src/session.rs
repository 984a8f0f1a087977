// src/session.rs

use crate::transcript::{Message, Sender, Transcript};
use std::fmt;

/// Fixed reply recorded when a send does not succeed. All failure kinds
/// collapse to this one user-visible message.
pub const FALLBACK_TEXT: &str = "⚠️ Failed to reach the AI backend.";

/// Whether a send is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
}

/// Every way the session can change. `ChatSession::apply` is the single
/// mutation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    DraftEdited(String),
    SendAccepted { text: String },
    DeliverySucceeded { reply: String },
    DeliveryFailed,
    PanelOpened,
    PanelClosed,
}

/// What a listener is told after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    TranscriptAppended,
    RequestStateChanged,
    DraftChanged,
    PanelToggled,
}

type ChangeListener = Box<dyn FnMut(Change) + Send>;

/// One widget instance's mutable state: transcript, draft, request state
/// and the panel flag. Owned by a single widget for its whole lifetime;
/// nothing survives the drop.
///
/// Listeners run synchronously, in subscription order, strictly after the
/// mutation they describe.
pub struct ChatSession {
    transcript: Transcript,
    draft: String,
    request_state: RequestState,
    panel_open: bool,
    listeners: Vec<ChangeListener>,
}

impl ChatSession {
    /// Empty transcript, empty draft, `Idle`, panel closed.
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            draft: String::new(),
            request_state: RequestState::Idle,
            panel_open: false,
            listeners: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Message] {
        self.transcript.all()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn request_state(&self) -> RequestState {
        self.request_state
    }

    pub fn is_pending(&self) -> bool {
        self.request_state == RequestState::Pending
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// Registers a change listener. There is no unsubscribe; listeners
    /// live as long as the session.
    pub fn subscribe(&mut self, listener: impl FnMut(Change) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies one event to the session state and notifies listeners.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::DraftEdited(text) => {
                self.draft = text;
                self.notify(Change::DraftChanged);
            }
            SessionEvent::SendAccepted { text } => {
                self.transcript.append(Sender::User, text);
                self.draft.clear();
                self.set_request_state(RequestState::Pending);
                self.notify(Change::TranscriptAppended);
                self.notify(Change::RequestStateChanged);
            }
            SessionEvent::DeliverySucceeded { reply } => {
                self.transcript.append(Sender::Bot, reply);
                self.set_request_state(RequestState::Idle);
                self.notify(Change::TranscriptAppended);
                self.notify(Change::RequestStateChanged);
            }
            SessionEvent::DeliveryFailed => {
                self.transcript.append(Sender::Bot, FALLBACK_TEXT);
                self.set_request_state(RequestState::Idle);
                self.notify(Change::TranscriptAppended);
                self.notify(Change::RequestStateChanged);
            }
            SessionEvent::PanelOpened => {
                self.panel_open = true;
                self.notify(Change::PanelToggled);
            }
            SessionEvent::PanelClosed => {
                self.panel_open = false;
                self.notify(Change::PanelToggled);
            }
        }
    }

    fn set_request_state(&mut self, state: RequestState) {
        log::debug!("request state {:?} -> {:?}", self.request_state, state);
        self.request_state = state;
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("transcript", &self.transcript)
            .field("draft", &self.draft)
            .field("request_state", &self.request_state)
            .field("panel_open", &self.panel_open)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
