//! Coloured presentation with a framed header and bubbles

use colored::Colorize;

use super::{PanelView, Renderer, View};
use crate::conversation::Sender;

const PANEL_WIDTH: usize = 60;

/// Coloured bubbles, accent-coloured header and launcher
#[derive(Debug, Clone, Copy, Default)]
pub struct RichRenderer;

impl Renderer for RichRenderer {
    fn render(&self, view: &View) -> String {
        match view {
            View::Launcher(launcher) => {
                let badge = if launcher.message_count > 0 {
                    format!(" {}", launcher.message_count)
                } else {
                    String::new()
                };
                format!(
                    "{}{}\n",
                    format!(" 💬 {} ", launcher.label)
                        .on_color(launcher.theme.accent())
                        .white()
                        .bold(),
                    badge.dimmed()
                )
            }
            View::Panel(panel) => render_panel(panel),
        }
    }
}

fn render_panel(panel: &PanelView) -> String {
    let accent = panel.header.theme.accent();
    let rule = "─".repeat(PANEL_WIDTH);
    let mut out = String::new();

    let title = match &panel.header.logo {
        Some(logo) => format!("◆ {}  ({})", panel.header.bot_name, logo),
        None => format!("◆ {}", panel.header.bot_name),
    };
    out.push_str(&format!("╭{}╮\n", rule).color(accent).to_string());
    out.push_str(&format!("  {}\n", title.color(accent).bold()));
    out.push_str(&format!("╰{}╯\n", rule).color(accent).to_string());

    if let Some(onboarding) = &panel.onboarding {
        out.push_str(&format!("  {}\n\n", onboarding.italic()));
    }

    for entry in &panel.entries {
        match entry.sender {
            Sender::User => {
                out.push_str(&format!("{:>width$}\n", "You".bold(), width = PANEL_WIDTH));
                for line in entry.text.lines() {
                    out.push_str(&format!("{:>width$}\n", line.cyan(), width = PANEL_WIDTH));
                }
            }
            Sender::Ai => {
                out.push_str(&format!("{}\n", entry.author.color(accent).bold()));
                for line in entry.text.lines() {
                    out.push_str(&format!("│ {}\n", line));
                }
                if let Some(source) = &entry.source {
                    out.push_str(&format!("│ {} {}\n", "Source:".dimmed(), source.underline()));
                }
            }
        }
        out.push('\n');
    }

    if panel.loading {
        out.push_str(&format!("{}\n\n", "● ● ●".color(accent).dimmed()));
    }

    if let Some(error) = &panel.error {
        out.push_str(&format!("{} {}\n", "⚠".red(), error.red()));
    }

    out.push_str(&format!("{}\n", rule.dimmed()));
    let send = if panel.input.send_enabled {
        "[Send ⏎]".color(accent).bold()
    } else {
        "[Send ⏎]".dimmed()
    };
    let hint = if panel.input.multiline {
        " (Shift+Enter for a new line)"
    } else {
        ""
    };
    out.push_str(&format!("✎ {} {}{}\n", panel.input.buffer, send, hint.dimmed()));
    out
}
