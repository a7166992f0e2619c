//! Theme-derived styles for assistant Markdown.

use pulldown_cmark::HeadingLevel;
use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

/// Style per Markdown element.
#[derive(Debug, Clone)]
pub struct MarkdownStyles {
    /// `#`, `##`, and everything deeper.
    headings: [Style; 3],
    pub text: Style,
    pub strong: Style,
    pub emphasis: Style,
    pub strikethrough: Style,
    pub code: Style,
    pub code_block: Style,
    pub blockquote: Style,
    pub list_marker: Style,
    /// Link text.
    pub link: Style,
    /// Destination shown after an external link.
    pub link_url: Style,
}

impl MarkdownStyles {
    pub fn from_theme(theme: &Theme) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let code = Style::default().fg(theme.secondary).bg(theme.surface);

        Self {
            headings: [
                bold.fg(theme.secondary),
                bold.fg(theme.text),
                bold.fg(theme.subtext),
            ],
            text: Style::default().fg(theme.text),
            strong: bold.fg(theme.text),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            code,
            code_block: code,
            blockquote: Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::ITALIC),
            list_marker: Style::default().fg(theme.muted),
            link: Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::UNDERLINED),
            link_url: Style::default().fg(theme.muted),
        }
    }

    /// Style for a heading of the given level.
    pub fn heading(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => self.headings[0],
            HeadingLevel::H2 => self.headings[1],
            _ => self.headings[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_theme() {
        let theme = Theme::night();
        let styles = MarkdownStyles::from_theme(&theme);

        assert!(styles.strong.add_modifier.contains(Modifier::BOLD));
        assert!(styles.emphasis.add_modifier.contains(Modifier::ITALIC));
        assert!(styles.link.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(styles.link.fg, Some(theme.primary));
        assert_eq!(styles.link_url.fg, Some(theme.muted));
    }

    #[test]
    fn test_heading_levels() {
        let theme = Theme::night();
        let styles = MarkdownStyles::from_theme(&theme);

        assert_eq!(styles.heading(HeadingLevel::H1).fg, Some(theme.secondary));
        assert_eq!(styles.heading(HeadingLevel::H2).fg, Some(theme.text));
        assert_eq!(styles.heading(HeadingLevel::H4), styles.heading(HeadingLevel::H3));
        assert!(styles
            .heading(HeadingLevel::H6)
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
