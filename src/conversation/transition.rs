//! Pure state transition function
//!
//! `transition` takes the current state and one event and returns the next
//! state plus the effects the controller must run. It performs no I/O and
//! reads no clock, so every rule below is testable without a renderer or a
//! network.

use thiserror::Error;

use super::message::Sender;
use super::{ConversationState, Effect, Event};
use crate::transport::QueryRequest;

/// Transcript text used when a successful answer carries no text
pub const MISSING_ANSWER_PLACEHOLDER: &str = "Sorry, I couldn't find an answer to that.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConversationState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events that are refused in the current state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A request is already in flight")]
    Busy,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("No request is in flight")]
    NoRequestInFlight,
}

/// Transcript text for a failed exchange
pub fn error_entry_text(message: &str) -> String {
    format!("Error: {}", message)
}

/// Compute the next state for `event`
pub fn transition(
    state: &ConversationState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Open => Ok(set_open(state, true)),
        Event::Close => Ok(set_open(state, false)),
        Event::Toggle => Ok(set_open(state, !state.is_open)),

        Event::DismissOnboarding => {
            let mut next = state.clone();
            next.onboarding_visible = false;
            Ok(TransitionResult::new(next).with_effect(Effect::Render))
        }

        // New input acknowledges any standing error
        Event::InputChanged { text } => {
            let mut next = state.clone();
            next.input_buffer = text;
            next.last_error = None;
            Ok(TransitionResult::new(next).with_effect(Effect::Render))
        }

        Event::Submit { text, at } => {
            if state.is_loading {
                return Err(TransitionError::Busy);
            }
            let query = text.trim();
            if query.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }

            let request = if state.is_initial {
                QueryRequest::initial(query)
            } else {
                QueryRequest::follow_up(query, state.thread_id.clone())
            };

            let mut next = state.clone();
            next.append(Sender::User, query.to_string(), None, at);
            next.input_buffer.clear();
            next.is_loading = true;
            next.last_error = None;
            next.onboarding_visible = false;

            Ok(TransitionResult::new(next)
                .with_effect(Effect::Render)
                .with_effect(Effect::SendQuery(request)))
        }

        Event::ExchangeSucceeded { answer, at } => {
            if !state.is_loading {
                return Err(TransitionError::NoRequestInFlight);
            }

            let mut next = state.clone();
            let text = answer
                .text
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| MISSING_ANSWER_PLACEHOLDER.to_string());
            next.append(Sender::Ai, text, answer.source, at);

            // The thread is bound once, by the first successful exchange
            if next.is_initial {
                next.thread_id = answer.thread_id;
                next.is_initial = false;
            }
            next.is_loading = false;

            Ok(TransitionResult::new(next).with_effect(Effect::Render))
        }

        Event::ExchangeFailed { error, at } => {
            if !state.is_loading {
                return Err(TransitionError::NoRequestInFlight);
            }

            let mut next = state.clone();
            let message = error.user_message();
            next.append(Sender::Ai, error_entry_text(&message), None, at);
            next.last_error = Some(message);
            next.is_loading = false;

            Ok(TransitionResult::new(next).with_effect(Effect::Render))
        }

        Event::ExchangeSettled => {
            let mut result = TransitionResult::new(state.clone());
            if state.is_loading {
                result.new_state.is_loading = false;
                result = result.with_effect(Effect::Render);
            }
            Ok(result)
        }
    }
}

fn set_open(state: &ConversationState, open: bool) -> TransitionResult {
    let mut next = state.clone();
    next.is_open = open;
    let result = TransitionResult::new(next);
    if open == state.is_open {
        result
    } else {
        result.with_effect(Effect::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;
    use crate::transport::Answer;
    use chrono::Utc;

    fn fresh() -> ConversationState {
        ConversationState::new("Hello! Ask me anything.", false, Utc::now())
    }

    fn apply(state: &ConversationState, event: Event) -> (ConversationState, Vec<Effect>) {
        let result = transition(state, event).expect("transition should succeed");
        (result.new_state, result.effects)
    }

    fn submit(text: &str) -> Event {
        Event::Submit {
            text: text.to_string(),
            at: Utc::now(),
        }
    }

    fn succeed(answer: Answer) -> Event {
        Event::ExchangeSucceeded {
            answer,
            at: Utc::now(),
        }
    }

    #[test]
    fn test_open_close_toggle() {
        let state = fresh();
        let (opened, effects) = apply(&state, Event::Open);
        assert!(opened.is_open());
        assert_eq!(effects, vec![Effect::Render]);

        let (still_open, effects) = apply(&opened, Event::Open);
        assert!(still_open.is_open());
        assert!(effects.is_empty());

        let (closed, _) = apply(&opened, Event::Toggle);
        assert!(!closed.is_open());
        let (closed_again, _) = apply(&opened, Event::Close);
        assert!(!closed_again.is_open());
    }

    #[test]
    fn test_close_keeps_messages() {
        let (open, _) = apply(&fresh(), Event::Open);
        let (busy, _) = apply(&open, submit("Hello"));
        let (answered, _) = apply(&busy, succeed(Answer::text("Hi!")));
        let (closed, _) = apply(&answered, Event::Close);
        assert_eq!(closed.messages(), answered.messages());
    }

    #[test]
    fn test_input_changed_clears_error() {
        let (busy, _) = apply(&fresh(), submit("Hello"));
        let (failed, _) = apply(
            &busy,
            Event::ExchangeFailed {
                error: ExchangeError::Status { status: 502 },
                at: Utc::now(),
            },
        );
        assert!(failed.last_error().is_some());

        let (typing, _) = apply(
            &failed,
            Event::InputChanged {
                text: "  again ".to_string(),
            },
        );
        assert!(typing.last_error().is_none());
        assert_eq!(typing.input_buffer(), "  again ");
    }

    #[test]
    fn test_submit_is_optimistic_and_requests_initial_query() {
        let state = fresh();
        let (next, effects) = apply(&state, submit("  Hello "));

        assert_eq!(next.messages().len(), 2);
        let user = next.messages().last().unwrap();
        assert_eq!(user.sender(), Sender::User);
        assert_eq!(user.text(), "Hello");
        assert!(next.is_loading());
        assert!(next.input_buffer().is_empty());
        assert_eq!(
            effects,
            vec![
                Effect::Render,
                Effect::SendQuery(QueryRequest::initial("Hello"))
            ]
        );
    }

    #[test]
    fn test_submit_whitespace_is_refused() {
        let state = fresh();
        let err = transition(&state, submit(" \t\n")).unwrap_err();
        assert_eq!(err, TransitionError::EmptyMessage);
    }

    #[test]
    fn test_submit_while_loading_is_refused() {
        let (busy, _) = apply(&fresh(), submit("one"));
        let err = transition(&busy, submit("two")).unwrap_err();
        assert_eq!(err, TransitionError::Busy);
    }

    #[test]
    fn test_first_success_binds_thread() {
        let (busy, _) = apply(&fresh(), submit("Hello"));
        let (answered, _) = apply(&busy, succeed(Answer::text("Hi!").with_thread("t1")));

        assert_eq!(answered.thread_id(), Some("t1"));
        assert!(!answered.is_initial());
        assert!(!answered.is_loading());
        assert_eq!(answered.messages().last().unwrap().text(), "Hi!");
    }

    #[test]
    fn test_later_success_does_not_rebind_thread() {
        let (busy, _) = apply(&fresh(), submit("Hello"));
        let (answered, _) = apply(&busy, succeed(Answer::text("Hi!").with_thread("t1")));
        let (busy, effects) = apply(&answered, submit("More info"));
        assert_eq!(
            effects[1],
            Effect::SendQuery(QueryRequest::follow_up("More info", Some("t1".to_string())))
        );
        let (answered, _) = apply(&busy, succeed(Answer::text("Sure").with_thread("t2")));
        assert_eq!(answered.thread_id(), Some("t1"));
    }

    #[test]
    fn test_success_without_text_uses_placeholder_and_keeps_source() {
        let (busy, _) = apply(&fresh(), submit("Hello"));
        let answer = Answer {
            text: None,
            source: Some("https://docs.example.com".to_string()),
            thread_id: None,
        };
        let (answered, _) = apply(&busy, succeed(answer));
        let last = answered.messages().last().unwrap();
        assert_eq!(last.text(), MISSING_ANSWER_PLACEHOLDER);
        assert_eq!(last.source(), Some("https://docs.example.com"));
        assert!(!answered.is_initial());
        assert!(answered.thread_id().is_none());
    }

    #[test]
    fn test_failure_appends_error_entry() {
        let (busy, _) = apply(&fresh(), submit("Hello"));
        let (failed, _) = apply(
            &busy,
            Event::ExchangeFailed {
                error: ExchangeError::Status { status: 500 },
                at: Utc::now(),
            },
        );
        assert!(!failed.is_loading());
        assert_eq!(failed.last_error(), Some("Request failed with status 500"));
        let last = failed.messages().last().unwrap();
        assert_eq!(last.sender(), Sender::Ai);
        assert!(last.text().contains("500"));
        assert!(failed.is_initial());
    }

    #[test]
    fn test_outcome_without_request_is_refused() {
        let err = transition(&fresh(), succeed(Answer::text("late"))).unwrap_err();
        assert_eq!(err, TransitionError::NoRequestInFlight);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let (busy, _) = apply(&fresh(), submit("Hello"));
        let (settled, effects) = apply(&busy, Event::ExchangeSettled);
        assert!(!settled.is_loading());
        assert_eq!(effects, vec![Effect::Render]);

        let (again, effects) = apply(&settled, Event::ExchangeSettled);
        assert_eq!(again, settled);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_submit_hides_onboarding() {
        let state = ConversationState::new("", true, Utc::now());
        let (next, _) = apply(&state, submit("Hi"));
        assert!(!next.onboarding_visible());
    }

    #[test]
    fn test_message_ids_unique_across_exchange() {
        let at = Utc::now();
        let state = ConversationState::new("greeting", false, at);
        let (busy, _) = apply(
            &state,
            Event::Submit {
                text: "Hello".to_string(),
                at,
            },
        );
        let (done, _) = apply(
            &busy,
            Event::ExchangeSucceeded {
                answer: Answer::text("Hi!"),
                at,
            },
        );
        let ids: Vec<&str> = done.messages().iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }
}
