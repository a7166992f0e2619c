//! Chat pane: message bubbles, scrolling and the pane widget.

mod bubble;
mod pane;
mod scroll;

pub use bubble::{bubble_lines, conversation_lines, typing_line};
pub use pane::ChatPane;
pub use scroll::{ChatScroll, PAGE_STEP, SCROLL_STEP};
