//! Test utilities for chatbubble
//!
//! Temporary config files, ready-made resolved configurations, controllers
//! over the scripted fake transport, and an error assertion helper.

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::{PresentationStyle, ResolvedConfig, WidgetConfig};
use crate::conversation::ConversationController;
use crate::transport::FakeTransport;

/// Create a temporary directory that is removed when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write a config file named `chatbubble.yaml` into `dir`
///
/// # Panics
///
/// Panics if writing the file fails
pub fn create_config_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("chatbubble.yaml");
    std::fs::write(&path, content).expect("Failed to write test config file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T, E: Display>(result: Result<T, E>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Resolved configuration with a test key and the given presentation
pub fn test_config(presentation: PresentationStyle) -> ResolvedConfig {
    let mut config = WidgetConfig::new("test-key");
    config.presentation = presentation;
    config.resolve().expect("test config must resolve")
}

/// Controller over a fresh [`FakeTransport`]; the transport is returned for scripting
pub fn fake_controller(
    presentation: PresentationStyle,
) -> (ConversationController, Arc<FakeTransport>) {
    let transport = Arc::new(FakeTransport::new());
    let controller = ConversationController::new(test_config(presentation), transport.clone());
    (controller, transport)
}

/// A YAML config using the camelCase keys of the embedding API
pub fn test_config_yaml() -> String {
    r##"
apiKey: yaml-key
apiEndpoint: https://bots.example.com/v2/query
botName: Helper
theme: "#0ea5e9"
welcomeMessage: Ask me about your order.
presentation: plain
showOnboarding: true
requestTimeoutSeconds: 10
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), String> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<(), String> = Err("different error".to_string());
        assert_error_contains(result, "not present");
    }
}
