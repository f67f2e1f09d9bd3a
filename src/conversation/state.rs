//! Conversation session state

use chrono::{DateTime, Utc};

use super::message::{Message, MessageIdSequence, Sender};

/// Everything the widget knows about the current session
///
/// The state is only changed through [`super::transition`]; outside the
/// conversation module it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub(super) messages: Vec<Message>,
    pub(super) thread_id: Option<String>,
    pub(super) is_initial: bool,
    pub(super) is_open: bool,
    pub(super) is_loading: bool,
    pub(super) last_error: Option<String>,
    pub(super) input_buffer: String,
    pub(super) onboarding_visible: bool,
    pub(super) ids: MessageIdSequence,
}

impl ConversationState {
    /// Fresh session: closed, idle, with the greeting as the only entry
    ///
    /// An empty greeting starts the transcript empty.
    pub fn new(welcome_message: &str, show_onboarding: bool, at: DateTime<Utc>) -> Self {
        let mut state = Self {
            messages: Vec::new(),
            thread_id: None,
            is_initial: true,
            is_open: false,
            is_loading: false,
            last_error: None,
            input_buffer: String::new(),
            onboarding_visible: show_onboarding,
            ids: MessageIdSequence::default(),
        };
        if !welcome_message.trim().is_empty() {
            state.append(Sender::Ai, welcome_message.to_string(), None, at);
        }
        state
    }

    pub(super) fn append(
        &mut self,
        sender: Sender,
        text: String,
        source: Option<String>,
        at: DateTime<Utc>,
    ) {
        let id = self.ids.next_id(at);
        self.messages.push(Message::new(id, text, sender, source, at));
    }

    /// Transcript, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Thread bound by the first successful exchange
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// True until the first successful exchange
    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Whether the overlay panel is shown
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the most recent failure, until acknowledged
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current content of the input control
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Whether the onboarding screen is still shown
    pub fn onboarding_visible(&self) -> bool {
        self.onboarding_visible
    }

    /// Whether the send affordance is enabled
    pub fn can_send(&self) -> bool {
        !self.is_loading && !self.input_buffer.trim().is_empty()
    }
}
