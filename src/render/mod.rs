//! Presentation shell
//!
//! Rendering happens in two steps. [`view`] turns the conversation state and
//! the resolved configuration into a [`View`], a plain description of what
//! is on screen. A [`Renderer`] then draws that description as terminal
//! text. Both steps are pure, and the renderer is chosen by
//! [`PresentationStyle`], so the plain and rich variants of the widget share
//! one controller.

mod plain;
mod rich;
mod theme;

pub use plain::PlainRenderer;
pub use rich::RichRenderer;
pub use theme::Theme;

use crate::config::{PresentationStyle, ResolvedConfig};
use crate::conversation::{ConversationState, Sender};

/// What the widget currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Closed: only the launcher button
    Launcher(LauncherView),
    /// Open: the overlay panel
    Panel(PanelView),
}

/// The floating launcher button
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherView {
    pub label: String,
    pub theme: Theme,
    /// Number of transcript entries, shown as a badge
    pub message_count: usize,
}

/// Header of the open panel
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub bot_name: String,
    pub logo: Option<String>,
    pub theme: Theme,
}

/// One transcript bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub sender: Sender,
    pub author: String,
    pub text: String,
    /// Citation link rendered below ai bubbles
    pub source: Option<String>,
}

/// The input control and send affordance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub buffer: String,
    pub multiline: bool,
    pub send_enabled: bool,
}

/// The open overlay panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub header: HeaderView,
    /// Onboarding text shown above the transcript until the first message
    pub onboarding: Option<String>,
    pub entries: Vec<EntryView>,
    /// Loading indicator standing in for the pending ai bubble
    pub loading: bool,
    pub error: Option<String>,
    pub input: InputView,
}

/// Build the view for the current state
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use chatbubble::config::WidgetConfig;
/// use chatbubble::conversation::ConversationState;
/// use chatbubble::render::{view, View};
///
/// let config = WidgetConfig::new("key").resolve().unwrap();
/// let state = ConversationState::new(&config.welcome_message, false, Utc::now());
/// assert!(matches!(view(&state, &config), View::Launcher(_)));
/// ```
pub fn view(state: &ConversationState, config: &ResolvedConfig) -> View {
    if !state.is_open() {
        return View::Launcher(LauncherView {
            label: format!("Chat with {}", config.bot_name),
            theme: config.theme.clone(),
            message_count: state.messages().len(),
        });
    }

    let entries = state
        .messages()
        .iter()
        .map(|message| EntryView {
            sender: message.sender(),
            author: match message.sender() {
                Sender::User => "You".to_string(),
                Sender::Ai => config.bot_name.clone(),
            },
            text: message.text().to_string(),
            source: match message.sender() {
                Sender::Ai => message.source().map(str::to_string),
                Sender::User => None,
            },
        })
        .collect();

    View::Panel(PanelView {
        header: HeaderView {
            bot_name: config.bot_name.clone(),
            logo: config.logo_image.clone(),
            theme: config.theme.clone(),
        },
        onboarding: state
            .onboarding_visible()
            .then(|| config.onboarding_message.clone()),
        entries,
        loading: state.is_loading(),
        error: state.last_error().map(str::to_string),
        input: InputView {
            buffer: state.input_buffer().to_string(),
            multiline: config.presentation == PresentationStyle::Rich,
            send_enabled: state.can_send(),
        },
    })
}

/// Draws a [`View`] as terminal text
pub trait Renderer: Send + Sync {
    /// Render the whole widget
    fn render(&self, view: &View) -> String;
}

/// Renderer for a presentation style
pub fn renderer_for(style: PresentationStyle) -> Box<dyn Renderer> {
    match style {
        PresentationStyle::Plain => Box::new(PlainRenderer),
        PresentationStyle::Rich => Box::new(RichRenderer),
    }
}

/// Build the view and draw it with the configured renderer
pub fn render(state: &ConversationState, config: &ResolvedConfig) -> String {
    renderer_for(config.presentation).render(&view(state, config))
}
