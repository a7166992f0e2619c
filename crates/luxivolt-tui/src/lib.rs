//! luxivolt-tui: Terminal front end for the Luxivolt assistant
//!
//! This crate provides:
//! - The hero panel with the chat call to action
//! - The chat pane (message bubbles, typing indicator, quick actions, input)
//! - Key bindings and the event loop

mod app;
mod chat;
mod event;
mod layout;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod widgets;

pub use app::App;
pub use chat::ChatScroll;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use luxivolt_chat;
pub use theme::{Theme, NO_COLOR_ENV};
pub use widgets::TextInputState;

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use luxivolt_chat::{ChatBackend, Config};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI until the user quits.
///
/// Sets up the terminal, runs the event loop and restores the terminal on
/// exit, including on error. A reply still pending at exit is dropped.
pub async fn run_tui(
    config: &Config,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(backend, config);
    let mut events = EventHandler::new(config.tick_rate_ms);
    info!(version = tui_version(), "TUI started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| layout::render_app(frame, app))?;

        match events.next().await {
            Some(event) => app.handle_event(event).await,
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}

#[cfg(test)]
mod snapshot_tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use luxivolt_chat::testing::ScriptedBackend;
    use luxivolt_chat::{Message, Role};

    use crate::test_utils::*;
    use crate::Event;

    #[tokio::test]
    async fn test_snapshot_too_small() {
        let mut app = create_test_app();
        let out = render_app_to_string(&mut app, 36, 4);
        insta::assert_snapshot!(out.trim_end(), @r"
        Terminal çok küçük
        En az 40x12 gerekli
        ");
    }

    #[tokio::test]
    async fn test_footer_closed() {
        let mut app = create_test_app();
        let out = render_app_to_string(&mut app, 80, 12);
        let footer = out.lines().last().unwrap_or_default();
        assert!(footer.starts_with("Luxivolt │ Sohbet kapalı "));
        assert!(footer.ends_with("[c] Sohbet │ [?] Yardım │ [Esc] Çıkış"));
    }

    #[tokio::test]
    async fn test_full_exchange_renders_bubbles() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_reply("Evet, **periyodik bakım** sunuyoruz.");
        let mut app = create_test_app_with(backend);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        type_text(&mut app, "Trafo bakımı?");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        app.widget.settle().await;
        app.handle_event(Event::Tick).await;

        let out = render_app_to_string(&mut app, 80, 30);
        assert!(out.contains("Trafo bakımı?"));
        assert!(out.contains("Evet, periyodik bakım sunuyoruz."));
        assert!(out.contains("↳ "));
        assert!(out.contains("Hazır"));
    }

    #[tokio::test]
    async fn test_fallback_renders_as_plain_link_text() {
        let mut app = create_test_app();
        app.widget.open();
        app.widget.send("test");
        app.widget.settle().await;
        app.handle_event(Event::Tick).await;

        let last = app.widget.conversation().last().cloned();
        assert!(matches!(last, Some(Message { role: Role::Assistant, .. })));

        let out = render_app_to_string(&mut app, 80, 30);
        assert!(out.contains("İletişim"));
        assert!(out.contains("sayfamızdan"));
        assert!(!out.contains("#iletisim"));
    }
}
