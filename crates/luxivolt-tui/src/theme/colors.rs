//! Color palette for the TUI.
//!
//! The default palette follows the Luxivolt brand: slate backgrounds with
//! blue and cyan accents.

use ratatui::style::Color;

/// Environment variable that disables colors when set.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Message bubbles
    pub user_bubble: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::night()
    }
}

impl Theme {
    /// Pick a palette from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os(NO_COLOR_ENV).is_some() {
            Self::plain()
        } else {
            Self::night()
        }
    }

    /// Brand night palette (default).
    pub fn night() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(2, 6, 23),      // #020617 (slate-950)
            surface: Color::Rgb(15, 23, 42), // #0f172a (slate-900)

            // Foregrounds
            text: Color::Rgb(241, 245, 249),    // #f1f5f9 (slate-100)
            subtext: Color::Rgb(148, 163, 184), // #94a3b8 (slate-400)
            muted: Color::Rgb(100, 116, 139),   // #64748b (slate-500)

            // Accents
            primary: Color::Rgb(96, 165, 250),   // #60a5fa (blue-400)
            secondary: Color::Rgb(34, 211, 238), // #22d3ee (cyan-400)

            // Message bubbles
            user_bubble: Color::Rgb(29, 78, 216), // #1d4ed8 (blue-700)

            // Borders
            border: Color::Rgb(51, 65, 85),            // #334155
            border_focused: Color::Rgb(96, 165, 250),  // #60a5fa
        }
    }

    /// Terminal default colors only (used under `NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            base: Color::Reset,
            surface: Color::Reset,
            text: Color::Reset,
            subtext: Color::Reset,
            muted: Color::Reset,
            primary: Color::Reset,
            secondary: Color::Reset,
            user_bubble: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_theme_creates() {
        let theme = Theme::night();
        assert!(matches!(theme.base, Color::Rgb(2, 6, 23)));
    }

    #[test]
    fn test_plain_theme_has_no_colors() {
        let theme = Theme::plain();
        assert_eq!(theme.primary, Color::Reset);
        assert_eq!(theme.user_bubble, Color::Reset);
    }

    #[test]
    fn test_default_is_night() {
        let default = Theme::default();
        assert!(matches!(default.base, Color::Rgb(2, 6, 23)));
    }
}
