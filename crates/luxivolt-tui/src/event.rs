//! Terminal events and key bindings.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that polls the terminal on a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling blocks, so it gets its own thread. Ticks fire on a
        // fixed schedule even while input keeps arriving.
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let event = match event::read() {
                        Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(e) = event {
                        if tx_clone.send(e).is_err() {
                            break;
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    OpenChat,
    CloseChat,
    Help,
    Submit,
    Newline,
    /// Trigger the quick action at this index.
    QuickAction(usize),
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    HistoryPrev,
    HistoryNext,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    None,
}

/// Map a key to an action. Bindings differ between the hero and the open chat.
pub fn key_to_action(key: KeyEvent, chat_open: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if !chat_open {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Enter => Action::OpenChat,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        };
    }

    // Ctrl+J is the portable newline; Ctrl+Enter only reaches us on
    // terminals with enhanced keyboard reporting.
    if ctrl && matches!(key.code, KeyCode::Char('j') | KeyCode::Enter) {
        return Action::Newline;
    }

    if alt {
        match key.code {
            KeyCode::Char(ch @ '1'..='9') => {
                return Action::QuickAction(ch as usize - '1' as usize);
            }
            KeyCode::Up => return Action::HistoryPrev,
            KeyCode::Down => return Action::HistoryNext,
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc => Action::CloseChat,
        KeyCode::Enter => Action::Submit,
        KeyCode::F(n @ 1..=9) => Action::QuickAction(usize::from(n) - 1),
        KeyCode::Char(ch) if !ctrl && !alt => Action::Insert(ch),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c, false), Action::Quit);
        assert_eq!(key_to_action(ctrl_c, true), Action::Quit);
    }

    #[test]
    fn test_hero_bindings() {
        assert_eq!(key_to_action(key(KeyCode::Char('c')), false), Action::OpenChat);
        assert_eq!(key_to_action(key(KeyCode::Char('?')), false), Action::Help);
        assert_eq!(key_to_action(key(KeyCode::Esc), false), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('x')), false), Action::None);
    }

    #[test]
    fn test_chat_typing_goes_to_input() {
        assert_eq!(key_to_action(key(KeyCode::Char('c')), true), Action::Insert('c'));
        assert_eq!(key_to_action(key(KeyCode::Char('?')), true), Action::Insert('?'));
        assert_eq!(key_to_action(key(KeyCode::Char('ş')), true), Action::Insert('ş'));
        assert_eq!(
            key_to_action(key_with(KeyCode::Char('A'), KeyModifiers::SHIFT), true),
            Action::Insert('A')
        );
    }

    #[test]
    fn test_chat_control_keys() {
        assert_eq!(key_to_action(key(KeyCode::Esc), true), Action::CloseChat);
        assert_eq!(key_to_action(key(KeyCode::Enter), true), Action::Submit);
        assert_eq!(
            key_to_action(key_with(KeyCode::Char('j'), KeyModifiers::CONTROL), true),
            Action::Newline
        );
        assert_eq!(key_to_action(key(KeyCode::Up), true), Action::ScrollUp);
        assert_eq!(key_to_action(key(KeyCode::PageDown), true), Action::PageDown);
    }

    #[test]
    fn test_quick_action_keys() {
        assert_eq!(key_to_action(key(KeyCode::F(1)), true), Action::QuickAction(0));
        assert_eq!(key_to_action(key(KeyCode::F(3)), true), Action::QuickAction(2));
        assert_eq!(
            key_to_action(key_with(KeyCode::Char('2'), KeyModifiers::ALT), true),
            Action::QuickAction(1)
        );
        assert_eq!(key_to_action(key(KeyCode::F(1)), false), Action::None);
    }

    #[test]
    fn test_history_keys() {
        assert_eq!(
            key_to_action(key_with(KeyCode::Up, KeyModifiers::ALT), true),
            Action::HistoryPrev
        );
        assert_eq!(
            key_to_action(key_with(KeyCode::Down, KeyModifiers::ALT), true),
            Action::HistoryNext
        );
    }
}
