//! Chat input bar.
//!
//! Multi-line input with Ctrl+J for newlines. While a reply is pending the
//! title switches to a waiting indicator; the text stays editable.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::TextInputState;
use crate::theme::Theme;

const PLACEHOLDER: &str = "Mesajınızı yazın...";

/// Bordered input bar rendering a [`TextInputState`].
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    focused: bool,
    waiting: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            focused: false,
            waiting: false,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Show the waiting indicator.
    #[must_use]
    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    /// Display lines and the index of the line holding the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let content = self.input.content();
        let prompt_style = Style::default().fg(self.theme.primary);

        if content.is_empty() {
            let mut spans = vec![Span::styled("> ", prompt_style)];
            if self.focused {
                spans.push(Span::raw("█"));
            }
            spans.push(Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted)));
            return (vec![Line::from(spans)], 0);
        }

        let cursor = self.input.cursor();
        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut consumed = 0;

        for (idx, text) in content.split('\n').enumerate() {
            let prefix = if idx == 0 { "> " } else { "  " };
            let len = text.chars().count();
            let mut spans = vec![Span::styled(prefix, prompt_style)];

            // Each line owns cursor positions consumed..=consumed + len.
            let on_line = cursor >= consumed && cursor <= consumed + len;
            if self.focused && on_line {
                cursor_line = idx;
                let col = cursor - consumed;
                let before: String = text.chars().take(col).collect();
                let after: String = text.chars().skip(col).collect();
                spans.push(Span::raw(before));
                spans.push(Span::raw("█"));
                spans.push(Span::raw(after));
            } else {
                spans.push(Span::raw(text.to_string()));
            }
            lines.push(Line::from(spans));
            consumed += len + 1;
        }

        (lines, cursor_line)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        if self.waiting {
            block = block
                .title(" ● Yanıt bekleniyor... ")
                .title_style(Style::default().fg(self.theme.muted));
        }

        let inner_height = area.height.saturating_sub(2) as usize;
        let (lines, cursor_line) = self.build_input_lines();

        // Keep the cursor line visible.
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(self.theme.text))
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(input: &TextInputState, waiting: bool) -> String {
        let theme = Theme::plain();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        InputBar::new(input, &theme)
            .focused(true)
            .waiting(waiting)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_placeholder_when_empty() {
        let out = render(&TextInputState::new(), false);
        assert!(out.contains("> █Mesajınızı yazın..."));
    }

    #[test]
    fn test_cursor_in_middle() {
        let mut input = TextInputState::new();
        input.insert_str("bakım");
        input.move_left();
        let out = render(&input, false);
        assert!(out.contains("> bakı█m"));
    }

    #[test]
    fn test_multiline_cursor_on_second_line() {
        let mut input = TextInputState::new();
        input.insert_str("bir\niki");
        let out = render(&input, false);
        assert!(out.contains("> bir"));
        assert!(out.contains("  iki█"));
        assert!(!out.contains("bir█"));
    }

    #[test]
    fn test_waiting_title() {
        let mut input = TextInputState::new();
        input.insert_str("taslak");
        let out = render(&input, true);
        assert!(out.contains("Yanıt bekleniyor"));
        assert!(out.contains("> taslak█"));
    }
}
