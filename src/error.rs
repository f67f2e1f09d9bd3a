//! Error types for chatbubble
//!
//! Two families live here: [`WidgetError`] covers everything that can go
//! wrong while setting the widget up (configuration, IO, terminal), and
//! [`ExchangeError`] covers the ways a single request/response exchange with
//! the remote chat API can fail. Exchange errors never end a session; their
//! `Display` output is the text shown to the user.

use thiserror::Error;

/// Fallback text used when the API reports `success: false` without a message.
pub const DEFAULT_REJECTION_MESSAGE: &str = "The assistant was unable to answer your question.";

/// Fallback text used for network failures and undecodable responses.
pub const DEFAULT_FAULT_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Main error type for widget setup and hosting
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Presentation errors (unknown style, bad theme colour)
    #[error("Presentation error: {0}")]
    Presentation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors from the interactive front-end
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Failure of one exchange with the remote chat API
///
/// The three variants mirror the three ways an exchange can go wrong. All of
/// them are handled identically by the controller: the `Display` text is
/// recorded as the transient error and appended to the transcript.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The server answered with a non-success HTTP status
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The server answered 2xx but the body carried `success: false`
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_REJECTION_MESSAGE))]
    Rejected {
        /// The body's `message` field, when present and non-empty
        message: Option<String>,
    },

    /// Network failure, timeout, or a body that could not be decoded
    #[error("{}", DEFAULT_FAULT_MESSAGE)]
    Transport {
        /// Diagnostic detail for logs; never shown to the user
        detail: String,
    },
}

impl ExchangeError {
    /// Build a transport fault from any displayable cause
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            detail: cause.to_string(),
        }
    }

    /// Human-readable message for the transcript and error banner
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for chatbubble operations
///
/// Uses `anyhow::Error` so callers can attach context while propagating.
pub type Result<T> = anyhow::Result<T>;
