//! Footer status bar.
//!
//! Format: `Luxivolt │ Hazır                 [Enter] Gönder │ [Esc] Kapat`
//!
//! The left side names the chat state, the right side lists key hints for it.

use luxivolt_chat::WidgetState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::text::visual_width;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Esc", "Ctrl+J").
    pub key: String,
    /// What the key does.
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer status bar widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    state: Option<WidgetState>,
}

impl<'a> FooterHints<'a> {
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            state: None,
        }
    }

    /// Chat state shown on the left.
    #[must_use]
    pub fn state(mut self, state: WidgetState) -> Self {
        self.state = Some(state);
        self
    }
}

fn state_label(state: WidgetState) -> &'static str {
    match state {
        WidgetState::Closed => "Sohbet kapalı",
        WidgetState::OpenIdle => "Hazır",
        WidgetState::OpenPending => "Yanıt bekleniyor",
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(self.theme.muted);
        let mut left_spans = vec![Span::styled(
            "Luxivolt",
            Style::default().fg(self.theme.primary),
        )];

        if let Some(state) = self.state {
            left_spans.push(Span::styled(" │ ", muted));
            left_spans.push(Span::styled(
                state_label(state),
                Style::default().fg(self.theme.subtext),
            ));
        }

        let mut right_spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", muted));
            }
            right_spans.push(Span::styled("[", muted));
            right_spans.push(Span::styled(
                hint.key.as_str(),
                Style::default().fg(self.theme.primary),
            ));
            right_spans.push(Span::styled("] ", muted));
            right_spans.push(Span::styled(
                hint.action.as_str(),
                Style::default().fg(self.theme.subtext),
            ));
        }

        let width_of = |spans: &[Span<'_>]| -> usize {
            spans.iter().map(|s| visual_width(&s.content)).sum()
        };
        let padding = (area.width as usize).saturating_sub(width_of(&left_spans) + width_of(&right_spans));
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

/// Hints for the current chat state.
pub fn hints_for_state(state: WidgetState) -> Vec<KeyHint> {
    match state {
        WidgetState::Closed => vec![
            KeyHint::new("c", "Sohbet"),
            KeyHint::new("?", "Yardım"),
            KeyHint::new("Esc", "Çıkış"),
        ],
        WidgetState::OpenIdle => vec![
            KeyHint::new("Enter", "Gönder"),
            KeyHint::new("Ctrl+J", "Satır"),
            KeyHint::new("F1-F3", "Hızlı"),
            KeyHint::new("Esc", "Kapat"),
        ],
        WidgetState::OpenPending => vec![
            KeyHint::new("↑/↓", "Kaydır"),
            KeyHint::new("Esc", "Kapat"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_key_hint_creation() {
        let hint = KeyHint::new("Esc", "Kapat");
        assert_eq!(hint.key, "Esc");
        assert_eq!(hint.action, "Kapat");
    }

    #[test]
    fn test_closed_hints_offer_open() {
        let hints = hints_for_state(WidgetState::Closed);
        assert!(hints.iter().any(|h| h.key == "c" && h.action == "Sohbet"));
        assert!(!hints.iter().any(|h| h.key == "Enter"));
    }

    #[test]
    fn test_idle_hints_offer_send() {
        let hints = hints_for_state(WidgetState::OpenIdle);
        assert!(hints.iter().any(|h| h.key == "Enter" && h.action == "Gönder"));
        assert!(hints.iter().any(|h| h.key == "F1-F3"));
    }

    #[test]
    fn test_pending_hints_hide_send() {
        let hints = hints_for_state(WidgetState::OpenPending);
        assert!(!hints.iter().any(|h| h.key == "Enter"));
        assert!(hints.iter().any(|h| h.key == "Esc"));
    }

    #[test]
    fn test_render_right_aligns_hints() {
        let theme = Theme::plain();
        let hints = vec![KeyHint::new("Esc", "Kapat")];
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&hints, &theme)
            .state(WidgetState::OpenIdle)
            .render(area, &mut buf);

        let out = buffer_to_string(&buf);
        assert!(out.starts_with("Luxivolt │ Hazır"));
        assert!(out.ends_with("[Esc] Kapat"));
    }
}
