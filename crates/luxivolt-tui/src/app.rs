//! Application state for the TUI.

use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use luxivolt_chat::{ChatBackend, ChatWidget, Config, PageSignal, SendOutcome, SignalBus};
use tracing::debug;

use crate::chat::{ChatScroll, PAGE_STEP, SCROLL_STEP};
use crate::event::{key_to_action, Action, Event};
use crate::theme::Theme;
use crate::widgets::TextInputState;

/// Main application state.
pub struct App {
    /// The chat widget; owns the conversation and the busy flag.
    pub widget: ChatWidget,
    /// Text being typed. Cleared only when the widget accepts a send.
    pub input: TextInputState,
    /// Message list scroll position.
    pub scroll: ChatScroll,
    /// Page-wide signal bus; the hero publishes on it.
    pub bus: SignalBus,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    /// Ticks since start, drives the typing indicator.
    pub tick_count: u64,
}

impl App {
    /// Create the app with a widget subscribed to a fresh signal bus.
    pub fn new(backend: Arc<dyn ChatBackend>, config: &Config) -> Self {
        let bus = SignalBus::new();
        let widget = ChatWidget::new(backend, config).with_signals(bus.subscribe());
        let mut scroll = ChatScroll::new();
        scroll.sync(widget.conversation().len());

        Self {
            widget,
            input: TextInputState::new(),
            scroll,
            bus,
            theme: Theme::from_env(),
            show_help: false,
            should_quit: false,
            tick_count: 0,
        }
    }

    /// Apply one terminal event, then pick up anything that settled meanwhile.
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Tick => self.tick_count = self.tick_count.wrapping_add(1),
            // Redrawn on the next pass.
            Event::Resize(_, _) => {}
        }
        self.refresh().await;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = key_to_action(key, self.widget.is_open());
        self.handle_action(action);
    }

    /// Handle a mouse event. Only the wheel is used.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.widget.is_open() {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.handle_action(Action::ScrollUp),
            MouseEventKind::ScrollDown => self.handle_action(Action::ScrollDown),
            _ => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::OpenChat => {
                // Opening goes through the bus like any other page element.
                self.bus.publish(PageSignal::OpenChat);
                self.widget.poll_signals();
                self.scroll.jump_to_bottom();
            }
            Action::CloseChat => self.widget.close(),
            Action::Submit => {
                let outcome = self.widget.send(self.input.content());
                self.after_send(outcome);
            }
            Action::QuickAction(idx) => {
                let outcome = self.widget.trigger_quick_action(idx);
                if outcome.is_accepted() {
                    self.scroll.sync(self.widget.conversation().len());
                }
            }
            Action::Newline => self.input.insert('\n'),
            Action::Insert(ch) => self.input.insert(ch),
            Action::Backspace => self.input.backspace(),
            Action::Delete => self.input.delete(),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::HistoryPrev => self.input.history_prev(),
            Action::HistoryNext => self.input.history_next(),
            Action::ScrollUp => self.scroll.scroll_up(SCROLL_STEP),
            Action::ScrollDown => self.scroll.scroll_down(SCROLL_STEP),
            Action::PageUp => self.scroll.scroll_up(PAGE_STEP),
            Action::PageDown => self.scroll.scroll_down(PAGE_STEP),
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    fn after_send(&mut self, outcome: SendOutcome) {
        match outcome {
            SendOutcome::Accepted => {
                self.input.submit();
                self.scroll.sync(self.widget.conversation().len());
            }
            SendOutcome::Busy => debug!("Input kept, reply still pending"),
            SendOutcome::Empty => {}
        }
    }

    /// Pick up page signals and a finished reply.
    async fn refresh(&mut self) {
        if self.widget.poll_signals() {
            self.scroll.jump_to_bottom();
        }
        self.widget.poll_reply().await;
        self.scroll.sync(self.widget.conversation().len());
    }
}
