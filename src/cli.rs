//! Command-line interface definition for chatbubble
//!
//! This module defines the CLI structure using clap's derive API: an
//! interactive `chat` session hosting the widget, and a one-shot `ask`.

use clap::{Parser, Subcommand};

use crate::config::PresentationStyle;

/// chatbubble - terminal host for the embeddable chat widget
///
/// Shows a launcher, opens an overlay conversation panel, and exchanges
/// messages with a remote chat API.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatbubble")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/chatbubble.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Override the API endpoint used for initial queries
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Override the bot name shown in the header
    #[arg(long)]
    pub bot_name: Option<String>,

    /// Presentation style: plain or rich
    #[arg(long, value_parser = PresentationStyle::parse_str)]
    pub presentation: Option<PresentationStyle>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive widget session
    Chat {
        /// Start with the panel open instead of showing the launcher
        #[arg(long)]
        open: bool,
    },

    /// Send a single question and print the transcript
    Ask {
        /// The question to send
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/chatbubble.yaml".to_string()),
            verbose: false,
            json_logs: false,
            api_endpoint: None,
            bot_name: None,
            presentation: None,
            command: Commands::Chat { open: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/chatbubble.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Chat { open: false }));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["chatbubble", "chat", "--open"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { open: true }));
    }

    #[test]
    fn test_cli_parse_ask_command() {
        let cli = Cli::try_parse_from(["chatbubble", "ask", "What is a thread?"]).unwrap();
        if let Commands::Ask { query } = cli.command {
            assert_eq!(query, "What is a thread?");
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_overrides() {
        let cli = Cli::try_parse_from([
            "chatbubble",
            "--presentation",
            "plain",
            "--api-endpoint",
            "https://bots.example.com/query",
            "--bot-name",
            "Helper",
            "chat",
        ])
        .unwrap();
        assert_eq!(cli.presentation, Some(PresentationStyle::Plain));
        assert_eq!(
            cli.api_endpoint.as_deref(),
            Some("https://bots.example.com/query")
        );
        assert_eq!(cli.bot_name.as_deref(), Some("Helper"));
    }

    #[test]
    fn test_cli_rejects_unknown_presentation() {
        let result = Cli::try_parse_from(["chatbubble", "--presentation", "html", "chat"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_ask_requires_query() {
        assert!(Cli::try_parse_from(["chatbubble", "ask"]).is_err());
    }
}
