//! Color themes.
//!
//! The active theme lives in a [`ThemeContext`] owned by the shell and handed
//! to every render call. Nothing about it is persisted.

use derive_getters::Getters;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("#{_0:02x}{_1:02x}{_2:02x}")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// The selectable themes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Green.
    #[default]
    Emerald,
    /// Blue.
    Blue,
    /// Violet.
    Purple,
    /// Pink.
    Pink,
}

impl Theme {
    /// Every theme, in picker order.
    pub const ALL: [Theme; 4] = [Theme::Emerald, Theme::Blue, Theme::Purple, Theme::Pink];

    /// Resolves the color tokens for this theme.
    pub fn colors(self) -> ThemeColors {
        let (primary, primary_dark, primary_light) = match self {
            Theme::Emerald => (
                Rgb(0x10, 0xb9, 0x81),
                Rgb(0x05, 0x96, 0x69),
                Rgb(0x34, 0xd3, 0x99),
            ),
            Theme::Blue => (
                Rgb(0x3b, 0x82, 0xf6),
                Rgb(0x1d, 0x4e, 0xd8),
                Rgb(0x60, 0xa5, 0xfa),
            ),
            Theme::Purple => (
                Rgb(0x8b, 0x5c, 0xf6),
                Rgb(0x6d, 0x28, 0xd9),
                Rgb(0xa7, 0x8b, 0xfa),
            ),
            Theme::Pink => (
                Rgb(0xec, 0x48, 0x99),
                Rgb(0xbe, 0x18, 0x5d),
                Rgb(0xf4, 0x72, 0xb6),
            ),
        };
        ThemeColors {
            primary,
            primary_dark,
            primary_light,
            gradient: format!("linear-gradient(135deg, {primary} 0%, {primary_dark} 100%)"),
        }
    }
}

/// Color tokens derived from a [`Theme`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ThemeColors {
    primary: Rgb,
    primary_dark: Rgb,
    primary_light: Rgb,
    gradient: String,
}

/// The active theme and its resolved tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeContext {
    theme: Theme,
    colors: ThemeColors,
}

impl ThemeContext {
    /// Context for `theme`.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            colors: theme.colors(),
        }
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Resolved tokens of the active theme.
    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    /// Switches to `theme` and re-resolves the tokens.
    #[instrument(skip(self), fields(from = %self.theme))]
    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            info!(to = %theme, "Theme changed");
        }
        self.theme = theme;
        self.colors = theme.colors();
    }

    /// Style for borders and highlighted text.
    pub fn accent(&self) -> Style {
        Style::default().fg(Color::from(self.colors.primary))
    }

    /// Style for titles.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(Color::from(self.colors.primary_light))
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row of a list.
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::from(self.colors.primary))
            .add_modifier(Modifier::BOLD)
    }

    /// Style for dimmed secondary elements.
    pub fn muted(&self) -> Style {
        Style::default().fg(Color::from(self.colors.primary_dark))
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
