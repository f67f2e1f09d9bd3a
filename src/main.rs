//! chatbubble - terminal host for the chat widget
//!
//! Main entry point for the chatbubble application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatbubble::cli::{Cli, Commands};
use chatbubble::commands;
use chatbubble::config::WidgetConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/chatbubble.yaml");
    let config = WidgetConfig::load(config_path, &cli)?;

    // Apply defaults and validate once, before any session starts
    let config = config.resolve()?;
    tracing::debug!(?config, "Resolved widget configuration");

    // Execute command
    match cli.command {
        Commands::Chat { open } => {
            commands::chat::run_chat(config, open).await?;
            Ok(())
        }
        Commands::Ask { query } => {
            tracing::info!("Sending one-shot query");
            commands::ask::run_ask(config, query).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so the rendered widget on stdout stays readable.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "chatbubble=debug"
    } else {
        "chatbubble=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
