//! In-process fake transport for tests and offline demos
//!
//! [`FakeTransport`] replaces the network with a queue of scripted outcomes
//! and records every request it receives, so tests can assert on routing and
//! body shape without a server.
//!
//! # Example
//!
//! ```
//! use chatbubble::transport::fake::FakeTransport;
//! use chatbubble::transport::{Answer, ChatTransport, QueryRequest};
//!
//! # tokio_test::block_on(async {
//! let transport = FakeTransport::new();
//! transport.push_answer(Answer::text("Hi!").with_thread("t1"));
//!
//! let answer = transport
//!     .send_query(&QueryRequest::initial("Hello"))
//!     .await
//!     .unwrap();
//! assert_eq!(answer.thread_id.as_deref(), Some("t1"));
//! assert_eq!(transport.requests().len(), 1);
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::ExchangeError;
use crate::transport::{Answer, ChatTransport, QueryRequest};

/// Scripted transport: answers come from a queue, requests go to a log
#[derive(Debug, Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<Result<Answer, ExchangeError>>>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl FakeTransport {
    /// Create a fake with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer
    pub fn push_answer(&self, answer: Answer) {
        self.push_outcome(Ok(answer));
    }

    /// Queue a failure
    pub fn push_error(&self, error: ExchangeError) {
        self.push_outcome(Err(error));
    }

    fn push_outcome(&self, outcome: Result<Answer, ExchangeError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of scripted outcomes not yet consumed
    pub fn pending_outcomes(&self) -> usize {
        self.outcomes.lock().map(|o| o.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl ChatTransport for FakeTransport {
    /// Record the request and pop the next scripted outcome
    ///
    /// An exhausted script behaves like an unreachable server.
    async fn send_query(&self, request: &QueryRequest) -> Result<Answer, ExchangeError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or_else(|| Err(ExchangeError::transport("fake transport script exhausted")))
    }
}
