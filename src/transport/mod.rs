//! Transport adapter between the conversation controller and the chat API
//!
//! This module defines the [`ChatTransport`] trait: one submitted query in,
//! exactly one outbound call, one normalized result out. Concrete
//! implementations live in submodules:
//!
//! - [`http::HttpTransport`] -- issues the real HTTP POST against the
//!   configured initial or follow-up URL.
//! - [`fake::FakeTransport`] -- in-process fake with scripted answers and a
//!   request log, used by tests and offline demos.
//!
//! # Canonical Import Path
//!
//! ```no_run
//! use chatbubble::transport::ChatTransport;
//! ```

use crate::error::ExchangeError;

pub mod fake;
pub mod http;

pub use fake::FakeTransport;
pub use http::HttpTransport;

/// One user turn as handed to the transport
///
/// `thread_id` is only ever populated for follow-up queries; the controller
/// never attaches a thread to an initial query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// The trimmed text the user submitted
    pub query: String,
    /// True until the first successful exchange of the session
    pub is_initial: bool,
    /// The thread bound by the first successful exchange
    pub thread_id: Option<String>,
}

impl QueryRequest {
    /// Build the first query of a session
    pub fn initial(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            is_initial: true,
            thread_id: None,
        }
    }

    /// Build a follow-up query, optionally bound to a thread
    pub fn follow_up(query: impl Into<String>, thread_id: Option<String>) -> Self {
        Self {
            query: query.into(),
            is_initial: false,
            thread_id,
        }
    }
}

/// Normalized successful answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    /// Answer text, if the server sent any
    pub text: Option<String>,
    /// Optional citation URL
    pub source: Option<String>,
    /// Thread identifier returned by the server
    pub thread_id: Option<String>,
}

impl Answer {
    /// Convenience constructor for an answer with text only
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Attach a thread id
    pub fn with_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Attach a citation URL
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Abstraction over the remote conversational API
///
/// Implementations must issue exactly one outbound call per invocation and
/// must not retry. Every failure is reported as an [`ExchangeError`] so the
/// controller can treat all of them alike.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync + std::fmt::Debug {
    /// Send one query and wait for its answer
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Status`] for non-2xx responses,
    /// [`ExchangeError::Rejected`] when the body reports `success: false`, and
    /// [`ExchangeError::Transport`] for network or decoding faults.
    async fn send_query(&self, request: &QueryRequest) -> Result<Answer, ExchangeError>;
}
