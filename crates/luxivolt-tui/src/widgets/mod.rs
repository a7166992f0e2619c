//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`Hero`] - Landing panel with the chat call to action
//! - [`InputBar`] and [`TextInputState`] - Chat input
//! - [`QuickActionBar`] - Preset question pills
//! - [`FooterHints`] - Bottom status and keybinding hints

mod footer_hints;
mod hero;
mod input_bar;
mod quick_actions;
mod text_input;

pub use footer_hints::{hints_for_state, FooterHints, KeyHint};
pub use hero::Hero;
pub use input_bar::InputBar;
pub use quick_actions::QuickActionBar;
pub use text_input::TextInputState;
