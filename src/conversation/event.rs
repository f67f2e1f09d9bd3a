//! Events that drive conversation state transitions

use chrono::{DateTime, Utc};

use crate::error::ExchangeError;
use crate::transport::Answer;

/// Inputs to [`super::transition`]
///
/// Events that create transcript entries carry their creation time so the
/// transition function itself stays free of clock reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Presentation events
    Open,
    Close,
    Toggle,
    DismissOnboarding,

    // Input events
    InputChanged {
        text: String,
    },
    Submit {
        text: String,
        at: DateTime<Utc>,
    },

    // Exchange events
    ExchangeSucceeded {
        answer: Answer,
        at: DateTime<Utc>,
    },
    ExchangeFailed {
        error: ExchangeError,
        at: DateTime<Utc>,
    },
    /// Always dispatched after an exchange, whatever its outcome
    ExchangeSettled,
}

impl Event {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Toggle => "toggle",
            Self::DismissOnboarding => "dismiss_onboarding",
            Self::InputChanged { .. } => "input_changed",
            Self::Submit { .. } => "submit",
            Self::ExchangeSucceeded { .. } => "exchange_succeeded",
            Self::ExchangeFailed { .. } => "exchange_failed",
            Self::ExchangeSettled => "exchange_settled",
        }
    }
}
