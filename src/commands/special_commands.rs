//! Special commands parser for the interactive widget session
//!
//! Special commands act on the widget itself instead of being sent to the
//! chat API:
//! - Open, close or toggle the overlay panel
//! - Start a new session
//! - View session status
//! - Display help information
//! - Exit
//!
//! Commands are prefixed with `/` and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an argument it does not take
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the overlay panel
    Open,

    /// Hide the overlay panel, keeping the transcript
    Close,

    /// Flip the panel between open and closed (the launcher "click")
    Toggle,

    /// Discard the transcript and thread and start over
    NewSession,

    /// Display thread, message count and loading/error state
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input is typed into the widget's input control.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns [`CommandError::UnknownCommand`] if input starts with "/" but is
/// not a valid command, and [`CommandError::UnsupportedArgument`] if a known
/// command is given an argument.
///
/// # Examples
///
/// ```
/// use chatbubble::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/open").unwrap(), SpecialCommand::Open);
/// assert_eq!(parse_special_command("hello there").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // exit/quit work without the slash
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let mut parts = lower.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let parsed = match command {
        "/open" => SpecialCommand::Open,
        "/close" | "/minimize" => SpecialCommand::Close,
        "/toggle" => SpecialCommand::Toggle,
        "/new" | "/reset" => SpecialCommand::NewSession,
        "/status" => SpecialCommand::ShowStatus,
        "/help" | "/?" => SpecialCommand::Help,
        "/exit" | "/quit" | "exit" | "quit" => SpecialCommand::Exit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    if !arg.is_empty() {
        return Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }

    Ok(parsed)
}

/// Print help for the interactive session
pub fn print_help() {
    println!(
        r#"
Special Commands for the Chat Widget
====================================

PANEL:
  /open           - Open the conversation panel
  /close          - Close the panel (the transcript is kept)
  /toggle         - Click the launcher: open if closed, close if open

SESSION:
  /new            - Start a new session (clears transcript and thread)
  /status         - Show thread, message count and request state
  /help           - Show this help message
  /exit           - Exit (also: exit, quit)

Anything else is typed into the input box and sent with Enter.
Sending while the panel is closed opens it first.
"#
    );
}
