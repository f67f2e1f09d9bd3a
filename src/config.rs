//! Configuration management for chatbubble
//!
//! The host supplies a [`WidgetConfig`]: a loose record in which only the API
//! key is mandatory. It can be read from a YAML file and then overridden by
//! environment variables and CLI flags. Before a session starts, the record is
//! resolved exactly once into a [`ResolvedConfig`], where every optional field
//! has been replaced by its default and both API URLs are concrete. Nothing
//! downstream applies defaults on its own.

use crate::error::{Result, WidgetError};
use anyhow::Context;
use crate::render::Theme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Initial-query URL used when no endpoint is configured
pub const DEFAULT_INITIAL_URL: &str = "http://localhost:8000/api/v1/query";

/// Follow-up URL used when no endpoint is configured
pub const DEFAULT_FOLLOW_UP_URL: &str = "http://localhost:8000/api/v1/follow-up";

/// Trailing path segment of an initial-query endpoint
const INITIAL_PATH_SUFFIX: &str = "/query";

/// Path segment that replaces [`INITIAL_PATH_SUFFIX`] for follow-ups
const FOLLOW_UP_PATH_SUFFIX: &str = "/follow-up";

/// Default display name of the assistant
pub const DEFAULT_BOT_NAME: &str = "Assistant";

/// Default accent colour
pub const DEFAULT_THEME: &str = "#4f46e5";

/// Default greeting shown as the first transcript entry
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hi! How can I help you today?";

/// Default text of the onboarding screen
pub const DEFAULT_ONBOARDING_MESSAGE: &str =
    "Ask a question below. Answers may include a link to their source.";

fn default_timeout_seconds() -> u64 {
    30
}

/// How the open panel is drawn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStyle {
    /// Unstyled text transcript
    Plain,
    /// Coloured bubbles with a framed header
    #[default]
    Rich,
}

impl PresentationStyle {
    /// Parse a presentation style from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use chatbubble::config::PresentationStyle;
    ///
    /// assert_eq!(PresentationStyle::parse_str("plain").unwrap(), PresentationStyle::Plain);
    /// assert!(PresentationStyle::parse_str("fancy").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "rich" => Ok(Self::Rich),
            other => Err(format!("Unknown presentation style: {}", other)),
        }
    }
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Rich => write!(f, "rich"),
        }
    }
}

/// Widget configuration as supplied by the host
///
/// Field names are snake_case; the camelCase spellings used by web hosts
/// (`apiKey`, `apiEndpoint`, ...) are accepted as aliases.
#[derive(Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Static bearer key for the chat API (required)
    #[serde(default, alias = "apiKey")]
    pub api_key: String,

    /// Base URL for initial queries; follow-ups use a derived URL
    #[serde(default, alias = "apiEndpoint")]
    pub api_endpoint: Option<String>,

    /// Name shown in the panel header
    #[serde(default, alias = "botName")]
    pub bot_name: Option<String>,

    /// Logo shown next to the bot name (path or URL)
    #[serde(default, alias = "logoImage")]
    pub logo_image: Option<String>,

    /// Accent colour: `#rrggbb` or a colour name
    #[serde(default)]
    pub theme: Option<String>,

    /// First message of every session
    #[serde(default, alias = "welcomeMessage")]
    pub welcome_message: Option<String>,

    /// Presentation layer used for the open panel
    #[serde(default)]
    pub presentation: PresentationStyle,

    /// Show an onboarding screen until the first message is sent
    #[serde(default, alias = "showOnboarding")]
    pub show_onboarding: bool,

    /// Text of the onboarding screen
    #[serde(default, alias = "onboardingMessage")]
    pub onboarding_message: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds", alias = "requestTimeoutSeconds")]
    pub request_timeout_seconds: u64,
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_endpoint", &self.api_endpoint)
            .field("bot_name", &self.bot_name)
            .field("logo_image", &self.logo_image)
            .field("theme", &self.theme)
            .field("welcome_message", &self.welcome_message)
            .field("presentation", &self.presentation)
            .field("show_onboarding", &self.show_onboarding)
            .field("onboarding_message", &self.onboarding_message)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: None,
            bot_name: None,
            logo_image: None,
            theme: None,
            welcome_message: None,
            presentation: PresentationStyle::default(),
            show_onboarding: false,
            onboarding_message: None,
            request_timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl WidgetConfig {
    /// Create a configuration holding only an API key
    ///
    /// # Examples
    ///
    /// ```
    /// use chatbubble::config::WidgetConfig;
    ///
    /// let config = WidgetConfig::new("secret");
    /// assert_eq!(config.api_key, "secret");
    /// assert!(config.api_endpoint.is_none());
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged, so a key supplied through the environment is enough to run.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(WidgetError::from)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Self = serde_yaml::from_str(&contents)
            .map_err(WidgetError::from)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("CHATBUBBLE_API_KEY") {
            self.api_key = api_key;
        }

        if let Ok(endpoint) = std::env::var("CHATBUBBLE_API_ENDPOINT") {
            tracing::debug!(endpoint = %endpoint, "Env override: CHATBUBBLE_API_ENDPOINT");
            self.api_endpoint = Some(endpoint);
        }

        if let Ok(bot_name) = std::env::var("CHATBUBBLE_BOT_NAME") {
            self.bot_name = Some(bot_name);
        }

        if let Ok(theme) = std::env::var("CHATBUBBLE_THEME") {
            self.theme = Some(theme);
        }

        if let Ok(welcome) = std::env::var("CHATBUBBLE_WELCOME_MESSAGE") {
            self.welcome_message = Some(welcome);
        }

        if let Ok(style) = std::env::var("CHATBUBBLE_PRESENTATION") {
            match PresentationStyle::parse_str(&style) {
                Ok(parsed) => self.presentation = parsed,
                Err(_) => tracing::warn!("Invalid CHATBUBBLE_PRESENTATION: {}", style),
            }
        }

        if let Ok(timeout) = std::env::var("CHATBUBBLE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.request_timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CHATBUBBLE_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(endpoint) = &cli.api_endpoint {
            self.api_endpoint = Some(endpoint.clone());
        }
        if let Some(bot_name) = &cli.bot_name {
            self.bot_name = Some(bot_name.clone());
        }
        if let Some(style) = cli.presentation {
            self.presentation = style;
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration and apply every default
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty, the endpoint is not an http(s)
    /// URL, the theme is not a recognised colour, or the timeout is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use chatbubble::config::{WidgetConfig, DEFAULT_FOLLOW_UP_URL, DEFAULT_INITIAL_URL};
    ///
    /// let resolved = WidgetConfig::new("secret").resolve().unwrap();
    /// assert_eq!(resolved.initial_url.as_str(), DEFAULT_INITIAL_URL);
    /// assert_eq!(resolved.follow_up_url.as_str(), DEFAULT_FOLLOW_UP_URL);
    /// ```
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(WidgetError::Config("api_key is required".to_string()).into());
        }

        if self.request_timeout_seconds == 0 {
            return Err(WidgetError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        let (initial_url, follow_up_url) = match non_blank(&self.api_endpoint) {
            Some(endpoint) => {
                let initial = parse_endpoint(endpoint)?;
                let follow_up = follow_up_endpoint(&initial);
                (initial, follow_up)
            }
            None => (
                parse_endpoint(DEFAULT_INITIAL_URL)?,
                parse_endpoint(DEFAULT_FOLLOW_UP_URL)?,
            ),
        };

        let theme_spec = non_blank(&self.theme).unwrap_or(DEFAULT_THEME);
        let theme = Theme::parse(theme_spec)?;

        Ok(ResolvedConfig {
            api_key: api_key.to_string(),
            initial_url,
            follow_up_url,
            bot_name: non_blank(&self.bot_name)
                .unwrap_or(DEFAULT_BOT_NAME)
                .to_string(),
            logo_image: non_blank(&self.logo_image).map(str::to_string),
            theme,
            welcome_message: non_blank(&self.welcome_message)
                .unwrap_or(DEFAULT_WELCOME_MESSAGE)
                .to_string(),
            presentation: self.presentation,
            show_onboarding: self.show_onboarding,
            onboarding_message: non_blank(&self.onboarding_message)
                .unwrap_or(DEFAULT_ONBOARDING_MESSAGE)
                .to_string(),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| WidgetError::Config(format!("Invalid api_endpoint '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WidgetError::Config(format!(
            "api_endpoint must use http or https, got '{}'",
            other
        ))
        .into()),
    }
}

/// Derive the follow-up URL from an initial-query URL
///
/// A trailing `/query` segment is replaced by `/follow-up`; any other path
/// gets `/follow-up` appended. Query strings are preserved.
///
/// # Examples
///
/// ```
/// use chatbubble::config::follow_up_endpoint;
/// use url::Url;
///
/// let initial = Url::parse("https://bots.example.com/v2/query").unwrap();
/// assert_eq!(
///     follow_up_endpoint(&initial).as_str(),
///     "https://bots.example.com/v2/follow-up"
/// );
/// ```
pub fn follow_up_endpoint(initial: &Url) -> Url {
    let mut url = initial.clone();
    let path = initial.path().trim_end_matches('/');
    let base = path.strip_suffix(INITIAL_PATH_SUFFIX).unwrap_or(path);
    url.set_path(&format!("{}{}", base, FOLLOW_UP_PATH_SUFFIX));
    url
}

/// Configuration with every default applied
///
/// Immutable for the lifetime of a session.
#[derive(Clone)]
pub struct ResolvedConfig {
    /// Bearer key sent with every request
    pub api_key: String,
    /// Destination of the first query of a session
    pub initial_url: Url,
    /// Destination of every query after the first successful one
    pub follow_up_url: Url,
    /// Name shown in the panel header
    pub bot_name: String,
    /// Optional logo reference
    pub logo_image: Option<String>,
    /// Accent colour
    pub theme: Theme,
    /// First message of every session
    pub welcome_message: String,
    /// Presentation layer for the open panel
    pub presentation: PresentationStyle,
    /// Show the onboarding screen until the first user message
    pub show_onboarding: bool,
    /// Text of the onboarding screen
    pub onboarding_message: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &redact(&self.api_key))
            .field("initial_url", &self.initial_url.as_str())
            .field("follow_up_url", &self.follow_up_url.as_str())
            .field("bot_name", &self.bot_name)
            .field("logo_image", &self.logo_image)
            .field("theme", &self.theme)
            .field("welcome_message", &self.welcome_message)
            .field("presentation", &self.presentation)
            .field("show_onboarding", &self.show_onboarding)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
