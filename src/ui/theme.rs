//! Theme definitions for heartline
//!
//! Provides three built-in themes: Blush, Midnight, and Transparent.
//! Each theme defines colors for all UI elements.

use crate::config::ThemeName;
use crate::types::{Gradient, Rgb};
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Tab bar
    pub bar_bg: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,

    /// Brand gradient used by the splash and headings
    pub brand: Gradient,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Blush => Self::blush(),
            ThemeName::Midnight => Self::midnight(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Warm dark theme (default)
    pub fn blush() -> Self {
        Self {
            // Base
            bg: Color::Rgb(30, 22, 28),
            fg: Color::Rgb(250, 236, 240),
            fg_dim: Color::Rgb(150, 126, 138),

            // Accent (rose)
            accent: Color::Rgb(255, 88, 100),
            accent_dim: Color::Rgb(190, 60, 80),

            // Status
            success: Color::Rgb(120, 220, 150),
            warning: Color::Rgb(255, 196, 90),
            error: Color::Rgb(255, 90, 90),

            // UI elements
            border: Color::Rgb(70, 50, 62),
            border_focused: Color::Rgb(255, 140, 150),
            selection_bg: Color::Rgb(70, 44, 58),
            selection_fg: Color::Rgb(255, 236, 240),

            // Tab bar
            bar_bg: Color::Rgb(40, 30, 38),
            badge_bg: Color::Rgb(255, 59, 92),
            badge_fg: Color::Rgb(255, 255, 255),

            brand: Gradient::new(Rgb(255, 88, 100), Rgb(255, 156, 84)),
        }
    }

    /// Cool night theme
    pub fn midnight() -> Self {
        Self {
            // Base
            bg: Color::Rgb(16, 18, 34),
            fg: Color::Rgb(228, 232, 250),
            fg_dim: Color::Rgb(110, 118, 150),

            // Accent (violet)
            accent: Color::Rgb(160, 120, 255),
            accent_dim: Color::Rgb(100, 80, 190),

            // Status
            success: Color::Rgb(110, 220, 170),
            warning: Color::Rgb(240, 200, 110),
            error: Color::Rgb(240, 100, 120),

            // UI elements
            border: Color::Rgb(44, 48, 80),
            border_focused: Color::Rgb(160, 120, 255),
            selection_bg: Color::Rgb(44, 48, 80),
            selection_fg: Color::Rgb(240, 242, 255),

            // Tab bar
            bar_bg: Color::Rgb(24, 26, 46),
            badge_bg: Color::Rgb(238, 66, 150),
            badge_fg: Color::Rgb(255, 255, 255),

            brand: Gradient::new(Rgb(142, 84, 233), Rgb(238, 66, 150)),
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            // Base - use terminal defaults
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            // Accent
            accent: Color::Magenta,
            accent_dim: Color::Red,

            // Status
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            // UI elements
            border: Color::DarkGray,
            border_focused: Color::Magenta,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            // Tab bar
            bar_bg: Color::Reset,
            badge_bg: Color::Red,
            badge_fg: Color::White,

            brand: Gradient::new(Rgb(255, 88, 100), Rgb(255, 156, 84)),
        }
    }

    // Style helpers for common UI patterns

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Tab bar background
    pub fn bar(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bar_bg)
    }

    /// Notification badge
    pub fn badge(&self) -> Style {
        Style::default()
            .fg(self.badge_fg)
            .bg(self.badge_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Warning message style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Toggle state marker
    pub fn toggle(&self, on: bool) -> Style {
        if on {
            Style::default().fg(self.success).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_dim)
        }
    }
}

/// Convert to a terminal color
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Best-effort RGB for a terminal color, for blending
pub fn rgb_of(color: Color) -> Option<Rgb> {
    match color {
        Color::Rgb(r, g, b) => Some(Rgb(r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let blush = Theme::from_name(ThemeName::Blush);
        assert_eq!(blush.bg, Color::Rgb(30, 22, 28));

        let midnight = Theme::from_name(ThemeName::Midnight);
        assert_eq!(midnight.bg, Color::Rgb(16, 18, 34));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert_eq!(transparent.bg, Color::Reset);
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
        assert_eq!(rgb_of(Color::Rgb(1, 2, 3)), Some(Rgb(1, 2, 3)));
        assert_eq!(rgb_of(Color::Reset), None);
    }
}
