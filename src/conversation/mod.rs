//! Conversation state machine
//!
//! Session state is an explicit [`ConversationState`] value changed only by
//! the pure [`transition`] function, which maps `(state, event)` to a new
//! state plus [`Effect`]s. The [`ConversationController`] owns the state,
//! stamps events with the clock, and runs the effects against a transport.

mod controller;
mod effect;
pub mod event;
mod message;
mod state;
mod transition;

pub use controller::{ConversationController, FocusTarget, Key, PendingExchange, SubmitOutcome};
pub use effect::Effect;
pub use event::Event;
pub use message::{Message, MessageIdSequence, Sender};
pub use state::ConversationState;
pub use transition::{
    error_entry_text, transition, TransitionError, TransitionResult, MISSING_ANSWER_PLACEHOLDER,
};
