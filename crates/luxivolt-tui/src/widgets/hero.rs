//! Landing panel with the firm tagline and the chat call to action.
//!
//! The hero never touches the chat widget; pressing `c` publishes an open
//! signal that the widget picks up.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::theme::Theme;

const DESCRIPTION: &str = "Luxivolt Mühendislik, endüstriyel tesislerden modern binalara kadar \
geniş bir yelpazede yüksek standartlı elektrik ve mühendislik çözümleri sunar.";

/// Hero panel.
pub struct Hero<'a> {
    theme: &'a Theme,
    chat_open: bool,
}

impl<'a> Hero<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            chat_open: false,
        }
    }

    /// Hide the call to action while the chat is already open.
    #[must_use]
    pub fn chat_open(mut self, open: bool) -> Self {
        self.chat_open = open;
        self
    }
}

impl Widget for Hero<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        let heading = Style::default()
            .fg(self.theme.text)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Geleceği ", heading),
                Span::styled("Enerjiyle", heading.fg(self.theme.primary)),
                Span::styled(" İnşa Ediyoruz", heading),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                DESCRIPTION,
                Style::default().fg(self.theme.subtext),
            )),
            Line::from(""),
        ];

        if !self.chat_open {
            lines.push(Line::from(vec![
                Span::styled("[c] ", Style::default().fg(self.theme.secondary)),
                Span::styled(
                    "AI Chatbot",
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(chat_open: bool) -> String {
        let theme = Theme::plain();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        Hero::new(&theme).chat_open(chat_open).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_hero_shows_tagline_and_cta() {
        let out = render(false);
        assert!(out.contains("Geleceği Enerjiyle İnşa Ediyoruz"));
        assert!(out.contains("Luxivolt Mühendislik"));
        assert!(out.contains("[c] AI Chatbot"));
    }

    #[test]
    fn test_hero_hides_cta_when_open() {
        let out = render(true);
        assert!(out.contains("Geleceği Enerjiyle İnşa Ediyoruz"));
        assert!(!out.contains("AI Chatbot"));
    }
}
