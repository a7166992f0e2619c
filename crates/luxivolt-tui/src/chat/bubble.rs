//! Message bubbles.
//!
//! ```text
//!                         Trafo bakım hizmetleriniz
//!                                      nelerdir?
//!                                          14:02
//!
//! Periyodik bakım sunuyoruz:
//! • Yağ analizi
//! ↳ 14:02
//! ```
//!
//! User bubbles are plain text aligned right; assistant bubbles are Markdown
//! aligned left. Each bubble is followed by its timestamp and a blank line.

use luxivolt_chat::{Message, Role};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::text::{render_markdown, wrap_lines, wrap_plain};
use crate::theme::Theme;

/// Share of the pane width a bubble may use, in percent.
const BUBBLE_WIDTH_PCT: usize = 85;

/// Widest a bubble may be inside a pane of `width` cells.
pub fn bubble_width(width: usize) -> usize {
    (width * BUBBLE_WIDTH_PCT / 100).max(1)
}

/// Render one message to display lines.
pub fn bubble_lines(message: &Message, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let max = bubble_width(width);
    let stamp_style = Style::default().fg(theme.muted);

    let mut lines = match message.role {
        Role::User => {
            let style = Style::default().fg(theme.text).bg(theme.user_bubble);
            let mut lines: Vec<Line<'static>> = wrap_plain(&message.content, max)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, style)).alignment(Alignment::Right))
                .collect();
            lines.push(
                Line::from(Span::styled(message.timestamp.clone(), stamp_style))
                    .alignment(Alignment::Right),
            );
            lines
        }
        Role::Assistant => {
            let mut lines = wrap_lines(render_markdown(&message.content, theme), max);
            lines.push(Line::from(vec![
                Span::styled("↳ ", Style::default().fg(theme.secondary)),
                Span::styled(message.timestamp.clone(), stamp_style),
            ]));
            lines
        }
    };
    lines.push(Line::from(""));
    lines
}

/// Render a whole conversation.
pub fn conversation_lines<'m>(
    messages: impl IntoIterator<Item = &'m Message>,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    messages
        .into_iter()
        .flat_map(|m| bubble_lines(m, width, theme))
        .collect()
}

/// Frames of the typing indicator.
const TYPING_FRAMES: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];

/// Animated typing indicator for a pending reply.
pub fn typing_line(tick: u64, theme: &Theme) -> Line<'static> {
    #[allow(clippy::cast_possible_truncation)]
    let frame = TYPING_FRAMES[(tick % TYPING_FRAMES.len() as u64) as usize];
    Line::from(vec![
        Span::styled(frame, Style::default().fg(theme.secondary)),
        Span::styled(
            " yazıyor",
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bubble_width() {
        assert_eq!(bubble_width(100), 85);
        assert_eq!(bubble_width(0), 1);
    }

    #[test]
    fn test_user_bubble_right_aligned() {
        let theme = Theme::plain();
        let msg = Message::with_timestamp(Role::User, "Merhaba", "09:15");
        let lines = bubble_lines(&msg, 40, &theme);

        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["Merhaba", "09:15", ""]);
        assert_eq!(lines[0].alignment, Some(Alignment::Right));
        assert_eq!(lines[1].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_user_bubble_is_not_markdown() {
        let theme = Theme::plain();
        let msg = Message::with_timestamp(Role::User, "**kalın**", "09:15");
        let lines = bubble_lines(&msg, 40, &theme);
        assert_eq!(text_of(&lines[0]), "**kalın**");
    }

    #[test]
    fn test_user_bubble_wraps() {
        let theme = Theme::plain();
        let msg = Message::with_timestamp(
            Role::User,
            "Trafo bakım hizmetleriniz nelerdir?",
            "09:15",
        );
        let lines = bubble_lines(&msg, 20, &theme);
        // Wrapped body, timestamp, blank.
        assert!(lines.len() > 3);
        for line in &lines {
            assert!(line.width() <= bubble_width(20));
        }
    }

    #[test]
    fn test_assistant_bubble_markdown() {
        let theme = Theme::plain();
        let msg = Message::with_timestamp(
            Role::Assistant,
            "Hizmetlerimiz:\n\n- Trafo bakımı\n- Pano montajı",
            "10:30",
        );
        let lines = bubble_lines(&msg, 60, &theme);
        let texts: Vec<String> = lines.iter().map(text_of).collect();

        assert_eq!(texts.first().map(String::as_str), Some("Hizmetlerimiz:"));
        assert!(texts.iter().any(|t| t == "• Trafo bakımı"));
        assert!(texts.iter().any(|t| t == "↳ 10:30"));
        assert_eq!(texts.last().map(String::as_str), Some(""));
        assert_eq!(lines[0].alignment, None);
    }

    #[test]
    fn test_conversation_lines_concatenates() {
        let theme = Theme::plain();
        let messages = vec![
            Message::with_timestamp(Role::Assistant, "Merhaba", "10:00"),
            Message::with_timestamp(Role::User, "Selam", "10:01"),
        ];
        let lines = conversation_lines(&messages, 40, &theme);
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_typing_line_cycles() {
        let theme = Theme::plain();
        assert_eq!(text_of(&typing_line(0, &theme)), "●∙∙ yazıyor");
        assert_eq!(text_of(&typing_line(1, &theme)), "∙●∙ yazıyor");
        assert_eq!(text_of(&typing_line(3, &theme)), "●∙∙ yazıyor");
    }
}
