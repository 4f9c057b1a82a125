//! Quadra (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the pieces that
//! touch the outside world: configuration, the high-score file, sound cues,
//! the event dispatcher and the screen state machine driven by the binary.

pub mod app;
pub mod audio;
pub mod config;
pub mod dispatch;
pub mod highscore;

pub use quadra_core as core;
pub use quadra_input as input;
pub use quadra_term as term;
pub use quadra_types as types;

pub use app::{App, Control, Screen};
pub use config::GameConfig;
pub use dispatch::{DispatchConfig, EventDispatcher};
pub use highscore::HighScoreFile;
