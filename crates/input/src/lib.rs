//! Terminal input mapping.
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`]s during play
//! and to [`MenuInput`]s on the menu screens. Holds no state of its own.

pub mod map;

pub use quadra_types as types;

pub use map::{handle_key_event, menu_input, should_quit, MenuInput};
