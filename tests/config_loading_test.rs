//! Configuration loading tests
//!
//! File, environment, and CLI layers of `WidgetConfig::load`. Tests that
//! touch `CHATBUBBLE_*` variables are serialized.

mod common;

use serial_test::serial;

use chatbubble::cli::Cli;
use chatbubble::config::{PresentationStyle, WidgetConfig};

use common::temp_config_file;

const ENV_VARS: &[&str] = &[
    "CHATBUBBLE_API_KEY",
    "CHATBUBBLE_API_ENDPOINT",
    "CHATBUBBLE_BOT_NAME",
    "CHATBUBBLE_THEME",
    "CHATBUBBLE_WELCOME_MESSAGE",
    "CHATBUBBLE_PRESENTATION",
    "CHATBUBBLE_TIMEOUT_SECONDS",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_from_yaml_file() {
    clear_env();
    let (_dir, path) = temp_config_file(
        r#"
api_key: file-key
api_endpoint: https://bots.example.com/v1/query
bot_name: Helper
logo_image: https://cdn.example.com/logo.png
welcome_message: Hello from the file
presentation: plain
"#,
    );

    let config = WidgetConfig::load(path.to_str().unwrap(), &Cli::default()).unwrap();
    let resolved = config.resolve().unwrap();

    assert_eq!(resolved.api_key, "file-key");
    assert_eq!(resolved.bot_name, "Helper");
    assert_eq!(
        resolved.logo_image.as_deref(),
        Some("https://cdn.example.com/logo.png")
    );
    assert_eq!(resolved.welcome_message, "Hello from the file");
    assert_eq!(resolved.presentation, PresentationStyle::Plain);
    assert_eq!(
        resolved.follow_up_url.as_str(),
        "https://bots.example.com/v1/follow-up"
    );
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let config = WidgetConfig::load(path.to_str().unwrap(), &Cli::default()).unwrap();

    assert!(config.api_key.is_empty());
    assert!(config.resolve().is_err());
}

#[test]
#[serial]
fn test_invalid_yaml_is_an_error() {
    clear_env();
    let (_dir, path) = temp_config_file("api_key: [unterminated");

    let err = WidgetConfig::load(path.to_str().unwrap(), &Cli::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let (_dir, path) = temp_config_file("api_key: file-key\nbot_name: FromFile\n");

    std::env::set_var("CHATBUBBLE_API_KEY", "env-key");
    std::env::set_var("CHATBUBBLE_BOT_NAME", "FromEnv");
    std::env::set_var("CHATBUBBLE_PRESENTATION", "plain");
    std::env::set_var("CHATBUBBLE_TIMEOUT_SECONDS", "12");

    let config = WidgetConfig::load(path.to_str().unwrap(), &Cli::default()).unwrap();
    clear_env();

    assert_eq!(config.api_key, "env-key");
    assert_eq!(config.bot_name.as_deref(), Some("FromEnv"));
    assert_eq!(config.presentation, PresentationStyle::Plain);
    assert_eq!(config.request_timeout_seconds, 12);
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    let (_dir, path) = temp_config_file("api_key: k\npresentation: plain\n");

    std::env::set_var("CHATBUBBLE_PRESENTATION", "hologram");
    std::env::set_var("CHATBUBBLE_TIMEOUT_SECONDS", "soon");

    let config = WidgetConfig::load(path.to_str().unwrap(), &Cli::default()).unwrap();
    clear_env();

    assert_eq!(config.presentation, PresentationStyle::Plain);
    assert_eq!(config.request_timeout_seconds, 30);
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    let (_dir, path) = temp_config_file("api_key: k\n");
    std::env::set_var("CHATBUBBLE_BOT_NAME", "FromEnv");
    std::env::set_var("CHATBUBBLE_API_ENDPOINT", "https://env.example.com/query");

    let cli = Cli {
        bot_name: Some("FromCli".to_string()),
        api_endpoint: Some("https://cli.example.com/query".to_string()),
        presentation: Some(PresentationStyle::Plain),
        ..Cli::default()
    };
    let config = WidgetConfig::load(path.to_str().unwrap(), &cli).unwrap();
    clear_env();

    let resolved = config.resolve().unwrap();
    assert_eq!(resolved.bot_name, "FromCli");
    assert_eq!(resolved.initial_url.as_str(), "https://cli.example.com/query");
    assert_eq!(
        resolved.follow_up_url.as_str(),
        "https://cli.example.com/follow-up"
    );
    assert_eq!(resolved.presentation, PresentationStyle::Plain);
}

#[test]
#[serial]
fn test_bad_theme_fails_resolution() {
    clear_env();
    let (_dir, path) = temp_config_file("api_key: k\ntheme: \"#12\"\n");

    let config = WidgetConfig::load(path.to_str().unwrap(), &Cli::default()).unwrap();
    assert!(config.resolve().is_err());
}
