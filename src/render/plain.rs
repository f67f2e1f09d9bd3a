//! Plain text presentation

use super::{PanelView, Renderer, View};

/// Unstyled transcript, one line per entry
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, view: &View) -> String {
        match view {
            View::Launcher(launcher) => {
                format!("[{}] ({})\n", launcher.label, launcher.message_count)
            }
            View::Panel(panel) => render_panel(panel),
        }
    }
}

fn render_panel(panel: &PanelView) -> String {
    let mut out = String::new();

    match &panel.header.logo {
        Some(logo) => out.push_str(&format!("== {} [{}] ==\n", panel.header.bot_name, logo)),
        None => out.push_str(&format!("== {} ==\n", panel.header.bot_name)),
    }

    if let Some(onboarding) = &panel.onboarding {
        out.push_str(onboarding);
        out.push('\n');
    }

    for entry in &panel.entries {
        out.push_str(&format!("{}: {}\n", entry.author, entry.text));
        if let Some(source) = &entry.source {
            out.push_str(&format!("  Source: {}\n", source));
        }
    }

    if panel.loading {
        out.push_str(&format!("{} is typing...\n", panel.header.bot_name));
    }

    if let Some(error) = &panel.error {
        out.push_str(&format!("! {}\n", error));
    }

    let send = if panel.input.send_enabled {
        "[Send]"
    } else {
        "[Send (disabled)]"
    };
    out.push_str(&format!("> {} {}\n", panel.input.buffer, send));
    out
}
