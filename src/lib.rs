//! chatbubble - embeddable chat widget core
//!
//! This library provides the pieces of a chat widget: a launcher that opens
//! an overlay conversation panel, and the request/response exchange with a
//! remote conversational API that binds follow-up questions to a thread.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `conversation`: Session state, the pure transition function, and the controller
//! - `transport`: The chat API adapter (HTTP and an in-process fake)
//! - `render`: The presentation shell (plain and rich terminal renderers)
//! - `config`: Configuration loading, defaulting and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: The terminal host
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatbubble::{ConversationController, HttpTransport, WidgetConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = WidgetConfig::new("my-api-key").resolve()?;
//!     let transport = HttpTransport::new(&config)?;
//!     let mut controller = ConversationController::new(config, Arc::new(transport));
//!
//!     controller.open();
//!     controller.submit("Hello").await;
//!     print!("{}", chatbubble::render::render(controller.state(), controller.config()));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod render;
pub mod transport;

// Re-export commonly used types
pub use config::{PresentationStyle, ResolvedConfig, WidgetConfig};
pub use conversation::{ConversationController, ConversationState, Message, Sender, SubmitOutcome};
pub use error::{ExchangeError, Result, WidgetError};
pub use transport::{Answer, ChatTransport, FakeTransport, HttpTransport, QueryRequest};

#[cfg(test)]
pub mod test_utils;
