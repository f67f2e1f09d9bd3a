use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use chatbubble::config::{ResolvedConfig, WidgetConfig};
use chatbubble::conversation::ConversationController;
use chatbubble::transport::FakeTransport;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("chatbubble.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Resolved config whose endpoint points at `base_url` + `/api/query`
#[allow(dead_code)]
pub fn config_for_server(base_url: &str) -> ResolvedConfig {
    let mut config = WidgetConfig::new("test-key");
    config.api_endpoint = Some(format!("{}/api/query", base_url));
    config.request_timeout_seconds = 5;
    config.resolve().expect("config for mock server must resolve")
}

#[allow(dead_code)]
pub fn fake_controller() -> (ConversationController, Arc<FakeTransport>) {
    let transport = Arc::new(FakeTransport::new());
    let config = WidgetConfig::new("test-key")
        .resolve()
        .expect("default config must resolve");
    let controller = ConversationController::new(config, transport.clone());
    (controller, transport)
}
