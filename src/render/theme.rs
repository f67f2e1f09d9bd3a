//! Accent colour handling
//!
//! The host's `theme` option is either a `#rrggbb` hex string or one of the
//! terminal colour names understood by `colored` (`blue`, `bright magenta`, ...).

use crate::error::{Result, WidgetError};
use colored::Color;

/// Parsed accent colour
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    spec: String,
    accent: Color,
}

impl Theme {
    /// Parse a theme specification
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Presentation`] if the value is neither a valid
    /// hex colour nor a known colour name
    ///
    /// # Examples
    ///
    /// ```
    /// use chatbubble::render::Theme;
    /// use colored::Color;
    ///
    /// let theme = Theme::parse("#ff8800").unwrap();
    /// assert_eq!(theme.accent(), Color::TrueColor { r: 255, g: 136, b: 0 });
    /// assert_eq!(Theme::parse("green").unwrap().accent(), Color::Green);
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        let accent = match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(|| {
                WidgetError::Presentation(format!("Invalid theme colour: {}", trimmed))
            })?,
            None => trimmed.parse::<Color>().map_err(|_| {
                WidgetError::Presentation(format!("Unknown theme colour: {}", trimmed))
            })?,
        };

        Ok(Self {
            spec: trimmed.to_string(),
            accent,
        })
    }

    /// The accent colour used for the launcher, header and ai bubbles
    pub fn accent(&self) -> Color {
        self.accent
    }

    /// The theme as the host wrote it
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
    Some(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
