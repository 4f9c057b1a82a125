//! Core gameplay engine - pure, deterministic, and testable
//!
//! This crate holds every game rule and no I/O: no terminal, no files, no
//! clocks. Callers feed it commands and elapsed time and read back snapshots
//! and events.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, placement checks, locking and line clearing
//! - [`pieces`]: 4x4 piece masks and clockwise rotation with a simple wall kick
//! - [`rng`]: 7-bag randomizer on a seeded LCG
//! - [`scoring`]: line points, combo bonus, level and fall speed
//! - [`game_state`]: the [`Session`] controller tying it all together
//! - [`snapshot`]: read-only per-frame view for renderers
//! - [`events`]: sinks for fire-and-forget [`GameEvent`](types::GameEvent)s
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every aligned run of 7 pieces has one of each kind
//! - **Rotation**: one clockwise transform of the 4x4 mask; tries in place,
//!   one left, one right. The O piece never rotates
//! - **Spawn**: anchor (3, 0); a blocked spawn ends the session
//! - **Hold**: one swap per spawned piece
//! - **Scoring**: 40/100/300/1200 times level, plus `combo * 50 * level`
//!   for consecutive clearing locks
//! - **Speed**: level `1 + lines / 10`, fall interval `max(100, 500 - (level - 1) * 50)` ms
//!
//! # Example
//!
//! ```
//! use quadra_core::Session;
//! use quadra_types::{GameAction, Phase};
//!
//! let mut session = Session::new(12345, 0);
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.phase(), Phase::Playing);
//! assert_eq!(session.board().filled_cells(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](game_state::Session::tick) once per frame with the
//! wall-clock time elapsed since the previous call. Falling depends only on
//! accumulated time, not on how often `tick` runs.

pub mod board;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use quadra_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineClear};
pub use events::{EventSink, NullSink};
pub use game_state::{ActivePiece, Session};
pub use pieces::{try_rotate, Mask};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_level, drop_interval_ms, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
