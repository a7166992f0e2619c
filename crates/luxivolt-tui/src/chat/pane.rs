//! Chat pane.
//!
//! ```text
//! ┌ Luxivolt AI ─────────────────────────┐
//! │ Endüstriyel Çözüm Ortağı             │
//! │──────────────────────────────────────│
//! │ Selam! Ben Luxivolt'un Teknik...     │
//! │ ↳ 14:01                              │
//! │                  Trafo bakımı?       │
//! │                          14:02       │
//! │ ∙●∙ yazıyor                          │
//! │ [F1] Trafo Bakımı  [F2] Proje ...    │
//! │┌ ● Yanıt bekleniyor... ─────────────┐│
//! ││> █Mesajınızı yazın...              ││
//! │└────────────────────────────────────┘│
//! └──────────────────────────────────────┘
//! ```

use luxivolt_chat::ChatWidget;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::line,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use super::bubble::{conversation_lines, typing_line};
use super::scroll::ChatScroll;
use crate::theme::Theme;
use crate::widgets::{InputBar, QuickActionBar, TextInputState};

/// Fixed height of the input bar, borders included.
const INPUT_HEIGHT: u16 = 4;

/// Chat pane widget. Scroll state is passed at render time.
pub struct ChatPane<'a> {
    widget: &'a ChatWidget,
    input: &'a TextInputState,
    theme: &'a Theme,
    tick: u64,
}

impl<'a> ChatPane<'a> {
    pub fn new(widget: &'a ChatWidget, input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            widget,
            input,
            theme,
            tick: 0,
        }
    }

    /// Animation tick for the typing indicator.
    #[must_use]
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                "Endüstriyel Çözüm Ortağı",
                Style::default().fg(self.theme.subtext),
            )),
            Line::from(Span::styled(
                line::HORIZONTAL.repeat(area.width as usize),
                Style::default().fg(self.theme.border),
            )),
        ];
        Paragraph::new(lines).render(area, buf);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_messages(&self, area: Rect, buf: &mut Buffer, scroll: &mut ChatScroll) {
        let mut lines = conversation_lines(
            self.widget.conversation(),
            area.width as usize,
            self.theme,
        );
        if self.widget.is_busy() {
            lines.push(typing_line(self.tick, self.theme));
        }

        let top = scroll.top_line(lines.len(), area.height as usize);
        Paragraph::new(lines)
            .style(Style::default().fg(self.theme.text))
            .scroll((top.min(u16::MAX as usize) as u16, 0))
            .render(area, buf);
    }
}

impl StatefulWidget for ChatPane<'_> {
    type State = ChatScroll;

    fn render(self, area: Rect, buf: &mut Buffer, scroll: &mut ChatScroll) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .title(" Luxivolt AI ")
            .title_style(
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(area);
        block.render(area, buf);

        let [header, messages, pills, input] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(inner);

        self.render_header(header, buf);
        self.render_messages(messages, buf, scroll);

        QuickActionBar::new(self.widget.quick_actions(), self.theme)
            .enabled(!self.widget.is_busy())
            .render(pills, buf);

        InputBar::new(self.input, self.theme)
            .focused(true)
            .waiting(self.widget.is_busy())
            .render(input, buf);
    }
}
