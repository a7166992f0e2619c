//! Text rendering utilities.
//!
//! - [`render_markdown`] - Render assistant replies to styled ratatui Lines
//! - [`wrap_lines`], [`wrap_plain`] - Width-aware wrapping
//! - [`truncate_to_width`], [`visual_width`] - Cell-width measurement

mod markdown;
mod styles;
mod width;
mod wrap;

pub use markdown::render_markdown;
pub use width::{truncate_to_width, visual_width};
pub use wrap::{wrap_lines, wrap_plain};
