//! Terminal front end for Quadra.
//!
//! Views render into a plain [`FrameBuffer`] (no I/O, unit-testable) and
//! [`TerminalRenderer`] flushes it through crossterm, diffing against the
//! previous frame. Board cells are drawn two columns wide.

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;

pub use quadra_core as core;
pub use quadra_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport, GAME_OVER_OPTIONS};
pub use menu_view::{MenuView, Page, MENU_OPTIONS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
