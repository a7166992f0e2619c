//! Test utilities for luxivolt-tui snapshot and integration testing.
//!
//! Helpers for building apps over scripted backends, rendering them to a
//! test terminal and converting buffers to strings for assertions.

use std::sync::Arc;

use luxivolt_chat::testing::ScriptedBackend;
use luxivolt_chat::Config;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use crate::app::App;
use crate::event::Action;
use crate::layout::render_app;
use crate::theme::Theme;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// App over an empty scripted backend, with the plain theme.
pub fn create_test_app() -> App {
    create_test_app_with(Arc::new(ScriptedBackend::new()))
}

/// App over the given scripted backend, with the plain theme.
pub fn create_test_app_with(backend: Arc<ScriptedBackend>) -> App {
    let mut app = App::new(backend, &Config::default());
    app.theme = Theme::plain();
    app
}

/// Type `text` into the app one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_action(Action::Insert(ch));
    }
}

/// Convert a buffer to a string, trimming trailing spaces on each row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the whole app at the given size and return the screen text.
pub fn render_app_to_string(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|frame| render_app(frame, app))
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[tokio::test]
    async fn test_create_test_app() {
        let app = create_test_app();
        assert!(!app.widget.is_open());
        assert_eq!(app.widget.conversation().len(), 1);
    }

    #[tokio::test]
    async fn test_type_text() {
        let mut app = create_test_app();
        type_text(&mut app, "çğış");
        assert_eq!(app.input.content(), "çğış");
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
