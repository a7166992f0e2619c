//! Theme for the TUI.
//!
//! - [`Theme`] - Color palette (brand night palette, plain under `NO_COLOR`)

mod colors;

pub use colors::{Theme, NO_COLOR_ENV};
