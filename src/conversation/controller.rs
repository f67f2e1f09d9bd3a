//! Conversation controller
//!
//! The controller owns the [`ConversationState`] of one session and is the
//! only place where state changes are applied. It feeds events through the
//! pure [`transition`] function and runs the resulting effects: a
//! [`Effect::SendQuery`] becomes one call on the configured
//! [`ChatTransport`].
//!
//! An exchange is split in two halves so hosts that drive the network
//! themselves can hold a request in flight:
//!
//! 1. [`ConversationController::begin_submit`] applies the optimistic update
//!    and hands back a [`PendingExchange`];
//! 2. [`ConversationController::complete`] applies the outcome and always
//!    settles the loading flag.
//!
//! [`ConversationController::submit`] runs both halves around the transport.
//!
//! [`Effect::Render`] is not drawn here: it raises a redraw request that the
//! host collects with [`ConversationController::take_render`].

use std::sync::Arc;

use chrono::Utc;

use super::{transition, ConversationState, Effect, Event, TransitionError};
use crate::config::{PresentationStyle, ResolvedConfig};
use crate::error::ExchangeError;
use crate::transport::{Answer, ChatTransport, QueryRequest};

/// An exchange that has been started but not completed
///
/// Carries the session epoch it belongs to, so a completion that arrives
/// after [`ConversationController::reset`] is recognised as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    request: QueryRequest,
    epoch: u64,
}

impl PendingExchange {
    /// The query that must be sent for this exchange
    pub fn request(&self) -> &QueryRequest {
        &self.request
    }
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission was refused (blank text, or a request already in flight)
    Ignored(TransitionError),
    /// An answer was appended to the transcript
    Answered,
    /// The exchange failed; the error was recorded and appended
    Failed(ExchangeError),
    /// The session was reset while the exchange was in flight
    Discarded,
}

/// A key press delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Activation key
    Enter,
    /// Enter with shift held: newline in a multi-line input, ignored by a
    /// single-line one
    ShiftEnter,
    Backspace,
    Char(char),
}

/// Where a key event happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The input control
    Input,
    /// Anywhere else in the panel (transcript, header, send button)
    Panel,
}

/// Owner of one chat session
#[derive(Debug)]
pub struct ConversationController {
    config: ResolvedConfig,
    transport: Arc<dyn ChatTransport>,
    state: ConversationState,
    epoch: u64,
    render_pending: bool,
}

impl ConversationController {
    /// Start a session
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use chatbubble::config::WidgetConfig;
    /// use chatbubble::conversation::ConversationController;
    /// use chatbubble::transport::FakeTransport;
    ///
    /// let config = WidgetConfig::new("secret").resolve().unwrap();
    /// let controller = ConversationController::new(config, Arc::new(FakeTransport::new()));
    /// assert_eq!(controller.state().messages().len(), 1);
    /// assert!(!controller.state().is_open());
    /// ```
    pub fn new(config: ResolvedConfig, transport: Arc<dyn ChatTransport>) -> Self {
        let state = Self::fresh_state(&config);
        tracing::info!(bot = %config.bot_name, "Chat session started");
        Self {
            config,
            transport,
            state,
            epoch: 0,
            render_pending: true,
        }
    }

    fn fresh_state(config: &ResolvedConfig) -> ConversationState {
        ConversationState::new(&config.welcome_message, config.show_onboarding, Utc::now())
    }

    /// Current session state
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Configuration this session was started with
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Apply one event and return its effects
    ///
    /// [`Effect::Render`] is applied immediately by raising the redraw
    /// request. [`Effect::SendQuery`] is returned to the caller and run by
    /// [`Self::submit`] or by the host through [`Self::exchange`].
    ///
    /// # Errors
    ///
    /// Returns the [`TransitionError`] when the event is refused; the state is
    /// left untouched in that case.
    pub fn dispatch(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let kind = event.kind();
        let result = transition(&self.state, event)?;
        tracing::debug!(
            event = kind,
            messages = result.new_state.messages().len(),
            loading = result.new_state.is_loading(),
            "Applied conversation event"
        );
        self.state = result.new_state;
        if result.effects.contains(&Effect::Render) {
            self.render_pending = true;
        }
        Ok(result.effects)
    }

    /// Whether the view changed since the last call
    ///
    /// Clears the request, so a host that redraws on `true` draws each change
    /// once.
    pub fn take_render(&mut self) -> bool {
        std::mem::take(&mut self.render_pending)
    }

    /// Show the panel
    pub fn open(&mut self) {
        self.dispatch_infallible(Event::Open);
    }

    /// Hide the panel; the transcript is kept
    pub fn close(&mut self) {
        self.dispatch_infallible(Event::Close);
    }

    /// Flip the panel between open and closed
    pub fn toggle(&mut self) {
        self.dispatch_infallible(Event::Toggle);
    }

    /// Hide the onboarding screen without sending anything
    pub fn dismiss_onboarding(&mut self) {
        self.dispatch_infallible(Event::DismissOnboarding);
    }

    /// Replace the input buffer; clears any standing error
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.dispatch_infallible(Event::InputChanged { text: text.into() });
    }

    fn dispatch_infallible(&mut self, event: Event) {
        if let Err(e) = self.dispatch(event) {
            tracing::warn!("Unexpected refusal of presentation event: {}", e);
        }
    }

    /// Apply the optimistic half of a submission
    ///
    /// Returns `Err` with the reason when the submission is a no-op.
    pub fn begin_submit(
        &mut self,
        text: impl Into<String>,
    ) -> Result<PendingExchange, TransitionError> {
        let effects = self
            .dispatch(Event::Submit {
                text: text.into(),
                at: Utc::now(),
            })
            .map_err(|e| {
                tracing::debug!("Submission ignored: {}", e);
                e
            })?;

        let request = effects
            .iter()
            .find_map(Effect::as_query)
            .cloned()
            .ok_or(TransitionError::EmptyMessage)?;

        Ok(PendingExchange {
            request,
            epoch: self.epoch,
        })
    }

    /// Apply the outcome of an exchange started with [`Self::begin_submit`]
    ///
    /// The loading flag is cleared afterwards no matter what happened while
    /// applying the outcome.
    pub fn complete(
        &mut self,
        pending: PendingExchange,
        outcome: Result<Answer, ExchangeError>,
    ) -> SubmitOutcome {
        if pending.epoch != self.epoch {
            tracing::warn!(
                started = pending.epoch,
                current = self.epoch,
                "Discarding completion from a previous session"
            );
            return SubmitOutcome::Discarded;
        }

        let at = Utc::now();
        let (event, submit_outcome) = match outcome {
            Ok(answer) => (
                Event::ExchangeSucceeded { answer, at },
                SubmitOutcome::Answered,
            ),
            Err(error) => {
                tracing::error!("Chat exchange failed: {}", error);
                (
                    Event::ExchangeFailed {
                        error: error.clone(),
                        at,
                    },
                    SubmitOutcome::Failed(error),
                )
            }
        };

        let applied = self.dispatch(event);
        self.dispatch_infallible(Event::ExchangeSettled);

        match applied {
            Ok(_) => submit_outcome,
            Err(e) => {
                tracing::error!("Could not apply exchange outcome: {}", e);
                SubmitOutcome::Ignored(e)
            }
        }
    }

    /// Submit `text` and wait for the answer
    ///
    /// Blank text and submissions while a request is in flight are no-ops and
    /// issue no request.
    pub async fn submit(&mut self, text: impl Into<String>) -> SubmitOutcome {
        let pending = match self.begin_submit(text) {
            Ok(pending) => pending,
            Err(reason) => return SubmitOutcome::Ignored(reason),
        };

        let outcome = self.exchange(&pending).await;
        self.complete(pending, outcome)
    }

    /// Send the query of a pending exchange over the transport
    ///
    /// Does not touch the state; pass the result to [`Self::complete`].
    pub async fn exchange(&self, pending: &PendingExchange) -> Result<Answer, ExchangeError> {
        self.transport.send_query(pending.request()).await
    }

    /// Submit the current content of the input control
    pub async fn submit_input(&mut self) -> SubmitOutcome {
        let text = self.state.input_buffer().to_string();
        self.submit(text).await
    }

    /// Handle a key press
    ///
    /// Enter sends only when the key event happened on the input control.
    /// Returns the submission outcome when the key triggered a send.
    pub async fn handle_key(&mut self, key: Key, target: FocusTarget) -> Option<SubmitOutcome> {
        if target != FocusTarget::Input {
            return None;
        }

        match key {
            Key::Enter => Some(self.submit_input().await),
            Key::ShiftEnter => {
                if self.config.presentation == PresentationStyle::Rich {
                    self.push_input_char('\n');
                }
                None
            }
            Key::Char(c) => {
                self.push_input_char(c);
                None
            }
            Key::Backspace => {
                let mut buffer = self.state.input_buffer().to_string();
                buffer.pop();
                self.update_input(buffer);
                None
            }
        }
    }

    fn push_input_char(&mut self, c: char) {
        let mut buffer = self.state.input_buffer().to_string();
        buffer.push(c);
        self.update_input(buffer);
    }

    /// End the current session and start a new one
    ///
    /// Exchanges still in flight from the old session are discarded when they
    /// complete.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = Self::fresh_state(&self.config);
        self.render_pending = true;
        tracing::info!(epoch = self.epoch, "Chat session reset");
    }
}
