//! Screen layout.
//!
//! ```text
//! ┌──────── hero ─────────┐┌──── chat (open) ────┐
//! │                       ││                      │
//! └───────────────────────┘└──────────────────────┘
//!  footer hints
//! ```
//!
//! On narrow terminals the open chat covers the hero.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::App;
use crate::chat::ChatPane;
use crate::theme::Theme;
use crate::widgets::{hints_for_state, FooterHints, Hero};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

/// Width from which the chat opens beside the hero instead of over it.
const SIDE_BY_SIDE_WIDTH: u16 = 100;

/// Render the whole screen.
pub fn render_app(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(area, frame.buffer_mut(), &app.theme);
        return;
    }

    let [main, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let open = app.widget.is_open();
    if open {
        let (hero_area, chat_area) = if main.width >= SIDE_BY_SIDE_WIDTH {
            let [hero, chat] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(main);
            (Some(hero), chat)
        } else {
            (None, main)
        };

        if let Some(hero_area) = hero_area {
            frame.render_widget(Hero::new(&app.theme).chat_open(true), hero_area);
        }
        let pane = ChatPane::new(&app.widget, &app.input, &app.theme).tick(app.tick_count);
        frame.render_stateful_widget(pane, chat_area, &mut app.scroll);
    } else {
        frame.render_widget(Hero::new(&app.theme), main);
    }

    let state = app.widget.state();
    let hints = hints_for_state(state);
    frame.render_widget(FooterHints::new(&hints, &app.theme).state(state), footer);

    if app.show_help {
        render_help_overlay(area, frame.buffer_mut(), &app.theme);
    }
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

const HELP_TEXT: &str = "
  Ana sayfa
    c / Enter         Sohbeti aç
    ?                 Bu yardımı aç/kapat
    Esc / q           Çıkış

  Sohbet
    Enter             Gönder
    Ctrl+J            Yeni satır
    F1-F3 / Alt+1-3   Hızlı sorular
    ↑/↓  PgUp/PgDn    Kaydır
    Alt+↑/Alt+↓       Önceki mesajlar
    Esc               Sohbeti kapat
    Ctrl+C            Çıkış

  [Kapatmak için bir tuşa basın]
";

/// Render the key help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let width = 48.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Yardım ")
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));

    Paragraph::new(HELP_TEXT)
        .block(block)
        .style(Style::default().fg(theme.text))
        .render(overlay_area, buf);
}

/// Render the "terminal too small" notice.
fn render_too_small(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let lines = vec![
        Line::from("Terminal çok küçük"),
        Line::from(format!("En az {MIN_WIDTH}x{MIN_HEIGHT} gerekli")),
    ];
    Paragraph::new(lines)
        .style(Style::default().fg(theme.subtext))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
