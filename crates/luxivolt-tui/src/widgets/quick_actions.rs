//! Quick-action pills shown above the input bar.

use luxivolt_chat::QuickAction;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::text::truncate_to_width;
use crate::theme::Theme;

/// Longest label shown on a pill, in cells.
const MAX_LABEL_WIDTH: usize = 18;

/// Row of `[F1] label` pills.
pub struct QuickActionBar<'a> {
    actions: &'a [QuickAction],
    theme: &'a Theme,
    enabled: bool,
}

impl<'a> QuickActionBar<'a> {
    pub fn new(actions: &'a [QuickAction], theme: &'a Theme) -> Self {
        Self {
            actions,
            theme,
            enabled: true,
        }
    }

    /// Dim the pills while a reply is pending.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for QuickActionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (key_style, label_style) = if self.enabled {
            (
                Style::default()
                    .fg(self.theme.secondary)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(self.theme.text),
            )
        } else {
            (
                Style::default().fg(self.theme.muted),
                Style::default().fg(self.theme.muted),
            )
        };

        let mut spans = Vec::new();
        for (idx, action) in self.actions.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[F{}] ", idx + 1), key_style));
            spans.push(Span::styled(
                truncate_to_width(&action.label, MAX_LABEL_WIDTH),
                label_style,
            ));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(actions: &[QuickAction], width: u16) -> String {
        let theme = Theme::plain();
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        QuickActionBar::new(actions, &theme).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_default_pills() {
        let actions = luxivolt_chat::Config::default().quick_actions;
        let out = render(&actions, 60);
        insta::assert_snapshot!(out, @"[F1] Trafo Bakımı  [F2] Proje Teklifi  [F3] İletişim");
    }

    #[test]
    fn test_long_label_truncated() {
        let actions = vec![QuickAction::new(
            "Kompanzasyon Panosu Revizyonu",
            "Kompanzasyon panosu revizyonu yapıyor musunuz?",
        )];
        let out = render(&actions, 60);
        assert!(out.contains("[F1] Kompanzasyon Pano…"));
    }

    #[test]
    fn test_empty_actions_render_nothing() {
        let out = render(&[], 20);
        assert_eq!(out.trim(), "");
    }
}
