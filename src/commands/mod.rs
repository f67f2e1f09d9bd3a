/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat`: interactive widget session
- `ask`: single question, transcript printed once

Both build one [`ConversationController`] over the HTTP transport and draw
it with the presentation layer chosen in the configuration.
*/

use std::sync::Arc;

use crate::config::ResolvedConfig;
use crate::conversation::{ConversationController, ConversationState};
use crate::error::{Result, WidgetError};
use crate::render;
use crate::transport::HttpTransport;

// Special commands parser for panel and session control
pub mod special_commands;

/// Create a controller talking to the configured chat API
///
/// # Errors
///
/// Returns error if the HTTP client cannot be built
pub fn build_controller(config: ResolvedConfig) -> Result<ConversationController> {
    let transport = HttpTransport::new(&config)?;
    Ok(ConversationController::new(config, Arc::new(transport)))
}

/// One-line summary of the session for `/status`
pub fn status_line(state: &ConversationState) -> String {
    let thread = state.thread_id().unwrap_or("none");
    let phase = if state.is_loading() {
        "waiting for answer"
    } else {
        "idle"
    };
    let mut line = format!(
        "panel: {} | thread: {} | messages: {} | {}",
        if state.is_open() { "open" } else { "closed" },
        thread,
        state.messages().len(),
        phase
    );
    if let Some(error) = state.last_error() {
        line.push_str(&format!(" | last error: {}", error));
    }
    line
}

// Chat command handler
pub mod chat {
    //! Interactive widget session.
    //!
    //! Runs a readline loop: slash commands drive the launcher and panel,
    //! every other line is typed into the input control and sent with Enter.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::conversation::SubmitOutcome;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive session
    ///
    /// # Arguments
    ///
    /// * `config` - Resolved widget configuration (consumed)
    /// * `start_open` - Open the panel immediately instead of showing the launcher
    pub async fn run_chat(config: ResolvedConfig, start_open: bool) -> Result<()> {
        tracing::info!(
            presentation = %config.presentation,
            endpoint = %config.initial_url,
            "Starting interactive chat session"
        );

        let mut controller = build_controller(config)?;
        if start_open {
            controller.open();
        }

        let mut rl = DefaultEditor::new().map_err(WidgetError::Readline)?;

        print_welcome_banner(&controller.config().bot_name);
        redraw_if_changed(&mut controller);

        loop {
            match rl.readline("› ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    match parse_special_command(&line) {
                        Ok(SpecialCommand::Open) => controller.open(),
                        Ok(SpecialCommand::Close) => controller.close(),
                        Ok(SpecialCommand::Toggle) => controller.toggle(),
                        Ok(SpecialCommand::NewSession) => controller.reset(),
                        Ok(SpecialCommand::ShowStatus) => {
                            println!("{}", status_line(controller.state()));
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {
                            let _ = rl.add_history_entry(line.as_str());
                            send_line(&mut controller, &line).await;
                        }
                        Err(e) => {
                            use colored::Colorize;
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    }

                    redraw_if_changed(&mut controller);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn send_line(controller: &mut ConversationController, line: &str) {
        if !controller.state().is_open() {
            controller.open();
        }
        controller.update_input(line);

        let text = controller.state().input_buffer().to_string();
        let pending = match controller.begin_submit(text) {
            Ok(pending) => pending,
            Err(reason) => {
                tracing::debug!("Input ignored: {}", reason);
                return;
            }
        };

        // Optimistic entry and loading indicator while the request is in flight
        redraw_if_changed(controller);

        let outcome = controller.exchange(&pending).await;
        if let SubmitOutcome::Failed(error) = controller.complete(pending, outcome) {
            tracing::debug!("Exchange failed in interactive session: {}", error);
        }
    }

    fn redraw_if_changed(controller: &mut ConversationController) {
        if controller.take_render() {
            print!("{}", render::render(controller.state(), controller.config()));
        }
    }

    fn print_welcome_banner(bot_name: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              chatbubble - terminal chat widget               ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Talking to: {}", bot_name);
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}

// Ask command handler
pub mod ask {
    //! One-shot question.

    use super::*;
    use crate::conversation::SubmitOutcome;

    /// Send `query` in a fresh session and print the transcript
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails; the transcript, including the
    /// error entry, is printed first.
    pub async fn run_ask(config: ResolvedConfig, query: String) -> Result<()> {
        let mut controller = build_controller(config)?;
        controller.open();

        let outcome = controller.submit(query).await;
        print!("{}", render::render(controller.state(), controller.config()));

        match outcome {
            SubmitOutcome::Answered => Ok(()),
            SubmitOutcome::Failed(error) => Err(error.into()),
            SubmitOutcome::Ignored(reason) => Err(reason.into()),
            SubmitOutcome::Discarded => Ok(()),
        }
    }
}
